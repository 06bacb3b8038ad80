//! Error types for the core engine

use crate::board::Pos;
use crate::eval::Outcome;
use crate::session::Turn;

/// Why a board cannot be searched
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidState {
    #[error("board has no empty cell")]
    BoardFull,

    #[error("game is already decided: {0}")]
    GameOver(Outcome),
}

/// Errors raised by the engine and the game session
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid board state: {0}")]
    InvalidState(#[from] InvalidState),

    #[error("cell {0} is already occupied")]
    CellOccupied(Pos),

    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("not your turn (current: {current:?})")]
    NotYourTurn { current: Turn },

    #[error("could not parse board: {0}")]
    Parse(String),

    #[error("board file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("board JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
