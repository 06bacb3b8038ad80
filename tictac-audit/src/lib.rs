//! TICTAC Audit - Checking the engine by playing it
//!
//! This crate provides verification infrastructure:
//! - Series play against scripted opponents (random, greedy, minimax)
//! - Exhaustive walk over every player strategy
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: caller orchestration (the `audit` CLI command)
//! - Level 2: play_series, verify_all_strategies (phases)
//! - Level 3: play_game_with (steps)
//! - Level 4: opponents, configuration

mod config;
mod exhaustive;
mod game_runner;
mod match_play;
mod opponent;

pub use config::{AuditConfig, OpponentKind};
pub use exhaustive::{verify_all_openers, verify_all_strategies, StrategyReport};
pub use game_runner::{play_game_with, GameRecord, GameRunner};
pub use match_play::{play_series, SeriesResult};
pub use opponent::Opponent;
