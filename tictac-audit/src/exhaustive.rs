//! Exhaustive strategy check - every player reply against the engine
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tictac_core::{best_move, evaluate, Board, EngineError, Outcome, Pos, Side};

/// Outcome counts over the whole strategy tree for one opener
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyReport {
    /// Side that moved first
    pub opener: Side,
    /// Distinct positions reached
    pub positions: usize,
    /// Distinct finished positions won by the engine
    pub computer_wins: u32,
    /// Distinct finished positions drawn
    pub draws: u32,
    /// Distinct finished positions won by the player
    pub player_wins: u32,
    /// Move sequences that beat the engine
    pub losing_lines: Vec<Vec<(Side, Pos)>>,
}

impl StrategyReport {
    fn new(opener: Side) -> Self {
        Self {
            opener,
            positions: 0,
            computer_wins: 0,
            draws: 0,
            player_wins: 0,
            losing_lines: Vec::new(),
        }
    }

    /// True if no player strategy beats the engine
    pub fn is_unbeaten(&self) -> bool {
        self.player_wins == 0
    }
}

/// Walk every player strategy with the engine's replies fixed
pub fn verify_all_strategies(opener: Side) -> Result<StrategyReport, EngineError> {
    let mut report = StrategyReport::new(opener);
    let mut seen: FxHashSet<Board> = FxHashSet::default();
    let mut path = Vec::with_capacity(9);

    explore(&Board::new(), opener, &mut path, &mut seen, &mut report)?;
    report.positions = seen.len();

    tracing::info!(
        "{} opens: {} positions, {} engine wins, {} draws, {} losses",
        opener,
        report.positions,
        report.computer_wins,
        report.draws,
        report.player_wins
    );
    Ok(report)
}

/// Check both openers on the rayon pool
pub fn verify_all_openers() -> Result<Vec<StrategyReport>, EngineError> {
    [Side::Player, Side::Computer]
        .par_iter()
        .map(|&opener| verify_all_strategies(opener))
        .collect()
}

fn explore(
    board: &Board,
    to_move: Side,
    path: &mut Vec<(Side, Pos)>,
    seen: &mut FxHashSet<Board>,
    report: &mut StrategyReport,
) -> Result<(), EngineError> {
    // The engine is deterministic, so a repeated position repeats its subtree
    if !seen.insert(*board) {
        return Ok(());
    }

    match evaluate(board) {
        Outcome::Win {
            winner: Side::Computer,
            ..
        } => {
            report.computer_wins += 1;
            return Ok(());
        }
        Outcome::Win {
            winner: Side::Player,
            ..
        } => {
            report.player_wins += 1;
            report.losing_lines.push(path.clone());
            return Ok(());
        }
        Outcome::Draw => {
            report.draws += 1;
            return Ok(());
        }
        Outcome::NoResult => {}
    }

    let replies: Vec<Pos> = match to_move {
        Side::Computer => vec![best_move(board)?],
        Side::Player => board.empty_cells().collect(),
    };

    for pos in replies {
        let next = board.with_move(pos, to_move)?;
        path.push((to_move, pos));
        explore(&next, to_move.opponent(), path, seen, report)?;
        path.pop();
    }

    Ok(())
}
