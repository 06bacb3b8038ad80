//! Exhaustive minimax move search

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::board::Pos;
use crate::error::{InvalidState, Result};
use crate::eval::{evaluate, Outcome};
use crate::game::{Board, Side};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a position the computer has won
pub const WIN_SCORE: i32 = 10;

/// Score of a position the player has won
pub const LOSS_SCORE: i32 = -10;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

/// Sentinel that any real score beats
const UNSCORED: i32 = 1000;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Anything that can pick the computer's next move
pub trait Strategy {
    fn choose(&self, board: &Board) -> Result<Pos>;
}

/// Full-depth minimax engine (stateless)
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimaxAI;

impl MinimaxAI {
    pub fn new() -> Self {
        Self
    }

    /// Get best move for the computer
    pub fn best_move(&self, board: &Board) -> Result<Pos> {
        best_move(board)
    }

    /// Search and report every root candidate
    pub fn analyze(&self, board: &Board) -> Result<SearchReport> {
        analyze(board)
    }
}

impl Strategy for MinimaxAI {
    fn choose(&self, board: &Board) -> Result<Pos> {
        best_move(board)
    }
}

/// Root score for one candidate move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub pos: Pos,
    pub score: i32,
}

/// Everything a search found out about a board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Chosen move
    pub best: Pos,
    /// Score of the chosen move
    pub score: i32,
    /// Root candidates in scan order
    pub candidates: Vec<Candidate>,
    /// Positions visited, root children included
    pub nodes: u64,
}

/// Best move for the computer on `board`
///
/// Fails with [`InvalidState`] when the board is full or already decided.
/// The caller's board is never modified.
pub fn best_move(board: &Board) -> Result<Pos> {
    analyze(board).map(|report| report.best)
}

/// Run the search and keep the per-candidate scores
pub fn analyze(board: &Board) -> Result<SearchReport> {
    check_searchable(board)?;

    let mut work = *board;
    let mut nodes = 0u64;
    let mut candidates = Vec::with_capacity(9);
    let mut best: Option<Candidate> = None;

    let moves: Vec<Pos> = work.empty_cells().collect();
    for pos in moves {
        let score = {
            let mut placed = Placement::new(&mut work, pos, Side::Computer);
            minimax(&mut placed, 0, false, &mut nodes)
        };
        let candidate = Candidate { pos, score };
        candidates.push(candidate);

        // Strictly greater: ties keep the first move in scan order
        if best.map_or(true, |b| score > b.score) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(InvalidState::BoardFull)?;

    tracing::debug!(
        "search chose {} with score {} after {} nodes",
        best.pos,
        best.score,
        nodes
    );

    Ok(SearchReport {
        best: best.pos,
        score: best.score,
        candidates,
        nodes,
    })
}

/// Reject boards with nothing left to play
fn check_searchable(board: &Board) -> std::result::Result<(), InvalidState> {
    match evaluate(board) {
        Outcome::NoResult => Ok(()),
        Outcome::Draw => Err(InvalidState::BoardFull),
        outcome @ Outcome::Win { .. } => Err(InvalidState::GameOver(outcome)),
    }
}

// ============================================================================
// MINIMAX
// ============================================================================

/// Score `board` assuming optimal alternating play
///
/// A node compares raw child scores, but stores the winning score shifted by
/// `depth` (down for the computer, up for the player).
fn minimax(board: &mut Board, depth: i32, computer_turn: bool, nodes: &mut u64) -> i32 {
    *nodes += 1;

    match evaluate(board) {
        Outcome::Win {
            winner: Side::Computer,
            ..
        } => return WIN_SCORE,
        Outcome::Win {
            winner: Side::Player,
            ..
        } => return LOSS_SCORE,
        Outcome::Draw => return DRAW_SCORE,
        Outcome::NoResult => {}
    }

    let moves: Vec<Pos> = board.empty_cells().collect();

    if computer_turn {
        let mut best = -UNSCORED;
        for pos in moves {
            let mut placed = Placement::new(board, pos, Side::Computer);
            let score = minimax(&mut placed, depth + 1, false, nodes);
            if score > best {
                best = score - depth;
            }
        }
        best
    } else {
        let mut best = UNSCORED;
        for pos in moves {
            let mut placed = Placement::new(board, pos, Side::Player);
            let score = minimax(&mut placed, depth + 1, true, nodes);
            if score < best {
                best = score + depth;
            }
        }
        best
    }
}

// ============================================================================
// SCOPED PLACEMENT
// ============================================================================

/// A provisional mark, cleared again when dropped
struct Placement<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, pos: Pos, side: Side) -> Self {
        debug_assert!(board.is_empty_at(pos));
        board.set(pos, side.mark());
        Self { board, pos }
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}

// ============================================================================
// TESTS
// ============================================================================
