//! Series play - many games of the engine against one opponent kind
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tictac_core::{EngineError, Side};

use crate::config::AuditConfig;
use crate::game_runner::{GameRecord, GameRunner};

/// Result of a series (multiple games)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesResult {
    /// Wins for the engine
    pub computer_wins: u32,
    /// Wins for the simulated human
    pub player_wins: u32,
    /// Drawn games
    pub draws: u32,
    /// Average game length in moves
    pub avg_moves: f32,
    /// Total games played
    pub games_played: u32,
    /// Individual game records
    pub games: Vec<GameRecord>,
}

impl SeriesResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            computer_wins: 0,
            player_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            games_played: 0,
            games: Vec::new(),
        }
    }

    /// Combine two results
    pub fn combine(&self, other: &SeriesResult) -> SeriesResult {
        let mut games = self.games.clone();
        games.extend(other.games.iter().cloned());
        aggregate_results(games)
    }

    /// Share of games the engine won
    pub fn computer_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.computer_wins as f32 / self.games_played as f32
        }
    }

    /// Games the engine lost
    pub fn losses(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter().filter(|g| g.player_wins())
    }

    /// True if the engine never lost
    pub fn is_clean(&self) -> bool {
        self.player_wins == 0
    }
}

/// Play a series according to `config` (Level 2 phase)
///
/// Runs on the rayon pool when `config.parallel` is set.
pub fn play_series(config: &AuditConfig) -> Result<SeriesResult, EngineError> {
    if config.games == 0 {
        return Ok(SeriesResult::empty());
    }

    let openers = prepare_openers(config);
    let records = if config.parallel {
        execute_games_parallel(config, &openers)?
    } else {
        execute_games(config, &openers)?
    };

    let result = aggregate_results(records);
    tracing::debug!(
        "series vs {:?}: {} won, {} lost, {} drawn",
        config.opponent,
        result.computer_wins,
        result.player_wins,
        result.draws
    );
    Ok(result)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Opener for each game of the series
fn prepare_openers(config: &AuditConfig) -> Vec<(usize, Side)> {
    (0..config.games)
        .map(|i| (i, config.opener_for(i)))
        .collect()
}

/// Execute games sequentially
fn execute_games(
    config: &AuditConfig,
    openers: &[(usize, Side)],
) -> Result<Vec<GameRecord>, EngineError> {
    let base_seed = config.seed.unwrap_or(42);

    openers
        .iter()
        .map(|&(index, opener)| play_single_game(config, base_seed, index, opener))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel(
    config: &AuditConfig,
    openers: &[(usize, Side)],
) -> Result<Vec<GameRecord>, EngineError> {
    let base_seed = config.seed.unwrap_or(42);

    openers
        .par_iter()
        .map(|&(index, opener)| play_single_game(config, base_seed, index, opener))
        .collect()
}

/// Play one game with a per-game seed
fn play_single_game(
    config: &AuditConfig,
    base_seed: u64,
    index: usize,
    opener: Side,
) -> Result<GameRecord, EngineError> {
    let mut runner = GameRunner::new(config);
    runner.reset_seed(base_seed.wrapping_add(index as u64));
    runner.play_game(opener)
}

/// Aggregate game records into a series result
fn aggregate_results(games: Vec<GameRecord>) -> SeriesResult {
    let computer_wins = games.iter().filter(|g| g.computer_wins()).count() as u32;
    let player_wins = games.iter().filter(|g| g.player_wins()).count() as u32;
    let draws = games.iter().filter(|g| g.is_draw()).count() as u32;

    let games_played = games.len() as u32;
    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games_played > 0 {
        total_moves as f32 / games_played as f32
    } else {
        0.0
    };

    SeriesResult {
        computer_wins,
        player_wins,
        draws,
        avg_moves,
        games_played,
        games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpponentKind;

    #[test]
    fn test_empty_series() {
        let config = AuditConfig::series(OpponentKind::Random, 0);
        let result = play_series(&config).unwrap();
        assert_eq!(result.games_played, 0);
        assert_eq!(result.avg_moves, 0.0);
        assert_eq!(result.computer_win_rate(), 0.0);
    }

    #[test]
    fn test_random_series_never_lost() {
        let config = AuditConfig::series(OpponentKind::Random, 20).with_seed(5);
        let result = play_series(&config).unwrap();
        assert_eq!(result.games_played, 20);
        assert!(result.is_clean());
        assert_eq!(
            result.computer_wins + result.draws,
            result.games_played
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = AuditConfig::series(OpponentKind::Greedy, 8).with_seed(11);
        let seq = play_series(&config).unwrap();
        let par = play_series(&config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.computer_wins, par.computer_wins);
        assert_eq!(seq.draws, par.draws);
        let seq_moves: Vec<_> = seq.games.iter().map(|g| g.moves.clone()).collect();
        let par_moves: Vec<_> = par.games.iter().map(|g| g.moves.clone()).collect();
        assert_eq!(seq_moves, par_moves);
    }

    #[test]
    fn test_combine() {
        let a = play_series(&AuditConfig::series(OpponentKind::FirstEmpty, 2)).unwrap();
        let b = play_series(&AuditConfig::series(OpponentKind::FirstEmpty, 3)).unwrap();
        let both = a.combine(&b);
        assert_eq!(both.games_played, 5);
        assert_eq!(both.games.len(), 5);
    }
}
