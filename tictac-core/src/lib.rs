//! TICTAC Core - Game engine and AI
//!
//! This crate provides the core game logic for TICTAC:
//! - Board geometry (3x3 grid, the eight winning lines)
//! - Cell and board state
//! - Outcome evaluation (win, draw, no result)
//! - Full-depth minimax AI for the computer side
//! - Turn sequencing for a player-versus-computer session

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;
pub mod session;
pub mod error;

// Re-exports for convenient access
pub use board::{Line, Move, Pos, ALL_POSITIONS, BOARD_SIZE, LINES};
pub use game::{Board, Cell, Side};
pub use eval::{evaluate, Outcome};
pub use ai::{analyze, best_move, Candidate, MinimaxAI, SearchReport, Strategy, WIN_SCORE};
pub use session::{GameSession, Turn};
pub use error::{EngineError, InvalidState};
