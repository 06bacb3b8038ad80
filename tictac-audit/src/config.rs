//! Configuration types for audit play
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};
use tictac_core::Side;

/// How the simulated human picks moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpponentKind {
    /// Uniformly random empty cell (seeded)
    Random,
    /// First empty cell in scan order
    FirstEmpty,
    /// Takes a win, else blocks, else random
    Greedy,
    /// Mirror of the engine: minimax from the player's side
    Minimax,
}

impl Default for OpponentKind {
    fn default() -> Self {
        OpponentKind::Random
    }
}

/// Audit configuration
#[derive(Clone, Debug)]
pub struct AuditConfig {
    /// Side making the first move of every game
    pub opener: Side,
    /// Swap the opener every other game
    pub alternate_opener: bool,
    /// Number of games per series
    pub games: usize,
    /// Simulated human strategy
    pub opponent: OpponentKind,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Random seed for reproducibility (None = 42)
    pub seed: Option<u64>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            opener: Side::Player,
            alternate_opener: true,
            games: 100,
            opponent: OpponentKind::Random,
            parallel: false,
            seed: None,
        }
    }
}

impl AuditConfig {
    /// Config for a series of `games` against `opponent`
    pub fn series(opponent: OpponentKind, games: usize) -> Self {
        Self {
            opponent,
            games,
            ..Default::default()
        }
    }

    /// Set the opener and stop alternating
    pub fn with_opener(mut self, opener: Side) -> Self {
        self.opener = opener;
        self.alternate_opener = false;
        self
    }

    /// Run the series on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Opener for the `index`-th game
    pub fn opener_for(&self, index: usize) -> Side {
        if self.alternate_opener && index % 2 == 1 {
            self.opener.opponent()
        } else {
            self.opener
        }
    }
}
