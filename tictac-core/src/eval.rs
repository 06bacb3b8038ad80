//! Outcome evaluation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Line, LINES};
use crate::game::{Board, Side};

/// Result of inspecting a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game still in progress
    NoResult,
    /// Three in a row
    Win { winner: Side, line: Line },
    /// Board full, no line
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::NoResult)
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoResult => write!(f, "no result"),
            Outcome::Win { winner, line } => write!(f, "{} wins ({})", winner, line),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Evaluate a board: first complete line in scan order, else draw or no result
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((winner, line)) = find_line(board) {
        return Outcome::Win { winner, line };
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::NoResult
    }
}

/// First line whose three cells hold the same mark
fn find_line(board: &Board) -> Option<(Side, Line)> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line.cells().map(|pos| board.get(pos));
        match a.side() {
            Some(side) if a == b && a == c => Some((side, line)),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_no_result() {
        assert_eq!(evaluate(&Board::new()), Outcome::NoResult);
    }

    #[test]
    fn test_every_line_detected() {
        for side in [Side::Player, Side::Computer] {
            for line in LINES {
                let mut b = Board::new();
                for pos in line.cells() {
                    b.set(pos, side.mark());
                }
                assert_eq!(
                    evaluate(&b),
                    Outcome::Win { winner: side, line },
                    "line {} for {}",
                    line,
                    side
                );
            }
        }
    }

    #[test]
    fn test_row_win_for_computer() {
        let outcome = evaluate(&board("OOO/XX./X.."));
        assert_eq!(
            outcome,
            Outcome::Win {
                winner: Side::Computer,
                line: Line::Row(0),
            }
        );
        assert!(outcome.is_terminal());
        assert_eq!(outcome.winner(), Some(Side::Computer));
    }

    #[test]
    fn test_anti_diagonal() {
        let outcome = evaluate(&board("..X/OX./XO."));
        assert_eq!(
            outcome,
            Outcome::Win {
                winner: Side::Player,
                line: Line::Diagonal(1),
            }
        );
        assert_eq!(
            outcome.line().map(|l| l.endpoints()),
            Some((Pos::new(2, 0), Pos::new(0, 2)))
        );
    }

    #[test]
    fn test_scan_order_prefers_rows() {
        // Row 2 and column 0 both complete: the row is scanned first
        let outcome = evaluate(&board("XOO/XO./XXX"));
        assert_eq!(
            outcome,
            Outcome::Win {
                winner: Side::Player,
                line: Line::Row(2),
            }
        );
    }

    #[test]
    fn test_full_board_draw() {
        let outcome = evaluate(&board("XOX/XOO/OXX"));
        assert_eq!(outcome, Outcome::Draw);
        assert!(outcome.is_terminal());
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn test_win_on_full_board_is_win() {
        assert_eq!(
            evaluate(&board("XXX/OOX/XOO")).winner(),
            Some(Side::Player)
        );
    }

    #[test]
    fn test_partial_board_no_result() {
        assert_eq!(evaluate(&board("XO./.X./..O")), Outcome::NoResult);
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let b = board("XO./.X./..O");
        let before = b;
        let _ = evaluate(&b);
        assert_eq!(b, before);
    }
}
