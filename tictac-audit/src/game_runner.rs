//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use serde::{Deserialize, Serialize};
use tictac_core::{best_move, evaluate, Board, EngineError, Outcome, Pos, Side};

use crate::config::{AuditConfig, OpponentKind};
use crate::opponent::Opponent;

/// Record of a single game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    /// Side that moved first
    pub opener: Side,
    /// Final outcome
    pub outcome: Outcome,
    /// Move history
    pub moves: Vec<(Side, Pos)>,
}

impl GameRecord {
    pub fn computer_wins(&self) -> bool {
        self.outcome.winner() == Some(Side::Computer)
    }

    pub fn player_wins(&self) -> bool {
        self.outcome.winner() == Some(Side::Player)
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// Final position
    pub fn final_board(&self) -> Board {
        let mut board = Board::new();
        for &(side, pos) in &self.moves {
            board.set(pos, side.mark());
        }
        board
    }
}

/// Plays engine-versus-opponent games
pub struct GameRunner {
    /// Opponent strategy
    opponent: OpponentKind,
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            opponent: config.opponent,
            seed_counter: config.seed.unwrap_or(42),
        }
    }

    /// Play a single game, returning the record
    pub fn play_game(&mut self, opener: Side) -> Result<GameRecord, EngineError> {
        let seed = self.next_seed();
        let mut opponent = Opponent::new(self.opponent, seed);
        play_game_with(&mut opponent, opener)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}

/// Play one game between the engine and `opponent`
pub fn play_game_with(opponent: &mut Opponent, opener: Side) -> Result<GameRecord, EngineError> {
    let mut board = Board::new();
    let mut moves = Vec::with_capacity(9);
    let mut to_move = opener;
    let mut outcome = Outcome::NoResult;

    while !outcome.is_terminal() {
        let pos = match to_move {
            Side::Computer => best_move(&board)?,
            Side::Player => match opponent.choose(&board) {
                Some(pos) => pos,
                None => break,
            },
        };

        board.place(pos, to_move)?;
        moves.push((to_move, pos));
        outcome = evaluate(&board);
        to_move = to_move.opponent();
    }

    Ok(GameRecord {
        opener,
        outcome,
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_empty_opponent_loses() {
        let mut opponent = Opponent::new(OpponentKind::FirstEmpty, 0);
        let record = play_game_with(&mut opponent, Side::Player).unwrap();
        assert!(record.outcome.is_terminal());
        assert!(!record.player_wins());
        assert_eq!(record.moves[0], (Side::Player, Pos::new(0, 0)));
        assert_eq!(record.moves[1], (Side::Computer, Pos::new(1, 1)));
    }

    #[test]
    fn test_minimax_mirror_draws() {
        let mut opponent = Opponent::new(OpponentKind::Minimax, 0);
        let record = play_game_with(&mut opponent, Side::Computer).unwrap();
        assert!(record.is_draw(), "expected draw, got {}", record.outcome);
        assert_eq!(record.moves.len(), 9);
    }

    #[test]
    fn test_final_board_matches_moves() {
        let mut runner = GameRunner::new(&AuditConfig::default());
        let record = runner.play_game(Side::Computer).unwrap();
        let board = record.final_board();
        assert_eq!(evaluate(&board), record.outcome);
        assert_eq!(record.moves[0].0, Side::Computer);
    }
}
