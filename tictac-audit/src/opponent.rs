//! Simulated human opponents
//!
//! Level 4 - Utilities

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tictac_core::{best_move, evaluate, Board, Cell, Pos, Side};

use crate::config::OpponentKind;

/// A scripted player-side strategy
pub struct Opponent {
    kind: OpponentKind,
    rng: ChaCha8Rng,
}

impl Opponent {
    pub fn new(kind: OpponentKind, seed: u64) -> Self {
        Self {
            kind,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn kind(&self) -> OpponentKind {
        self.kind
    }

    /// Pick the player's next move (None when the board is full)
    pub fn choose(&mut self, board: &Board) -> Option<Pos> {
        match self.kind {
            OpponentKind::Random => self.random_move(board),
            OpponentKind::FirstEmpty => board.empty_cells().next(),
            OpponentKind::Greedy => finishing_move(board, Side::Player)
                .or_else(|| finishing_move(board, Side::Computer))
                .or_else(|| self.random_move(board)),
            OpponentKind::Minimax => best_move(&mirror(board))
                .ok()
                .or_else(|| board.empty_cells().next()),
        }
    }

    fn random_move(&mut self, board: &Board) -> Option<Pos> {
        let moves: Vec<Pos> = board.empty_cells().collect();
        moves.choose(&mut self.rng).copied()
    }
}

/// A cell that would complete a line for `side`
fn finishing_move(board: &Board, side: Side) -> Option<Pos> {
    board.empty_cells().find(|&pos| {
        board
            .with_move(pos, side)
            .map(|next| evaluate(&next).winner() == Some(side))
            .unwrap_or(false)
    })
}

/// Swap the marks so the engine searches on the player's behalf
fn mirror(board: &Board) -> Board {
    let cells = (*board.cells()).map(|row| {
        row.map(|cell| match cell {
            Cell::Player => Cell::Computer,
            Cell::Computer => Cell::Player,
            Cell::Empty => Cell::Empty,
        })
    });
    Board::from_cells(cells)
}
