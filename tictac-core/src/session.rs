//! Turn sequencing for a player-versus-computer game

use serde::{Deserialize, Serialize};

use crate::ai::{MinimaxAI, Strategy};
use crate::board::Pos;
use crate::error::{EngineError, Result};
use crate::eval::{evaluate, Outcome};
use crate::game::{Board, Side};

/// Whose move it is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    PlayerTurn,
    ComputerTurn,
    GameOver,
}

impl Turn {
    fn for_side(side: Side) -> Self {
        match side {
            Side::Player => Turn::PlayerTurn,
            Side::Computer => Turn::ComputerTurn,
        }
    }
}

/// A game in progress: authoritative board, history and turn state
#[derive(Clone, Debug)]
pub struct GameSession<S: Strategy = MinimaxAI> {
    board: Board,
    turn: Turn,
    outcome: Outcome,
    history: Vec<(Side, Pos)>,
    opener: Side,
    engine: S,
}

impl GameSession<MinimaxAI> {
    /// New game against the minimax engine
    pub fn new(opener: Side) -> Self {
        Self::with_engine(opener, MinimaxAI::new())
    }
}

impl<S: Strategy> GameSession<S> {
    /// New game against a custom engine
    pub fn with_engine(opener: Side, engine: S) -> Self {
        Self {
            board: Board::new(),
            turn: Turn::for_side(opener),
            outcome: Outcome::NoResult,
            history: Vec::new(),
            opener,
            engine,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the board, safe to hand to another thread
    pub fn snapshot(&self) -> Board {
        self.board
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn opener(&self) -> Side {
        self.opener
    }

    /// Moves played so far, oldest first
    pub fn history(&self) -> &[(Side, Pos)] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.turn == Turn::GameOver
    }

    /// Nothing to reset on a blank board
    pub fn can_start_new_game(&self) -> bool {
        !self.board.is_blank()
    }

    /// Place the human's mark
    pub fn play_player(&mut self, pos: Pos) -> Result<Outcome> {
        self.expect_turn(Turn::PlayerTurn)?;
        self.apply(Side::Player, pos)
    }

    /// Let the engine move
    pub fn play_computer(&mut self) -> Result<(Pos, Outcome)> {
        self.expect_turn(Turn::ComputerTurn)?;
        let pos = self.engine.choose(&self.board)?;
        let outcome = self.apply(Side::Computer, pos)?;
        Ok((pos, outcome))
    }

    /// Apply a move computed elsewhere (e.g. on a worker thread)
    pub fn apply_computer_move(&mut self, pos: Pos) -> Result<Outcome> {
        self.expect_turn(Turn::ComputerTurn)?;
        self.apply(Side::Computer, pos)
    }

    /// Reset to an empty board with the same opener
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.turn = Turn::for_side(self.opener);
        self.outcome = Outcome::NoResult;
        self.history.clear();
    }

    fn expect_turn(&self, expected: Turn) -> Result<()> {
        if self.turn == expected {
            Ok(())
        } else {
            Err(EngineError::NotYourTurn { current: self.turn })
        }
    }

    fn apply(&mut self, side: Side, pos: Pos) -> Result<Outcome> {
        self.board.place(pos, side)?;
        self.history.push((side, pos));

        let outcome = evaluate(&self.board);
        self.outcome = outcome;
        self.turn = if outcome.is_terminal() {
            Turn::GameOver
        } else {
            Turn::for_side(side.opponent())
        };

        tracing::debug!("{} played {}: {}", side, pos, outcome);
        Ok(outcome)
    }
}
