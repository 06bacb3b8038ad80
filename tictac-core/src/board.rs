//! Board geometry: cell coordinates and the eight winning lines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Board side length
pub const BOARD_SIZE: u8 = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Row/column coordinate of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

/// A move is the coordinate of the cell to mark
pub type Move = Pos;

impl Pos {
    /// Unchecked constructor for literal coordinates
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Checked constructor
    pub fn try_new(row: u8, col: u8) -> Result<Self, EngineError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }

    /// Build from a row-major index (0-8)
    pub fn from_index(index: usize) -> Result<Self, EngineError> {
        if index < CELL_COUNT {
            Ok(ALL_POSITIONS[index])
        } else {
            Err(EngineError::OutOfBounds {
                row: (index / 3).min(u8::MAX as usize) as u8,
                col: (index % 3) as u8,
            })
        }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index (0-8)
    pub fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn is_corner(&self) -> bool {
        self.row != 1 && self.col != 1
    }

    pub fn is_center(&self) -> bool {
        self.row == 1 && self.col == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Every cell in scan order (row 0 to 2, column 0 to 2)
pub const ALL_POSITIONS: [Pos; CELL_COUNT] = [
    Pos::new(0, 0),
    Pos::new(0, 1),
    Pos::new(0, 2),
    Pos::new(1, 0),
    Pos::new(1, 1),
    Pos::new(1, 2),
    Pos::new(2, 0),
    Pos::new(2, 1),
    Pos::new(2, 2),
];

/// One of the eight winning lines
///
/// Diagonal 0 runs top-left to bottom-right, diagonal 1 runs bottom-left to
/// top-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(u8),
    Column(u8),
    Diagonal(u8),
}

/// All lines in evaluation order: rows, then columns, then diagonals
pub const LINES: [Line; 8] = [
    Line::Row(0),
    Line::Row(1),
    Line::Row(2),
    Line::Column(0),
    Line::Column(1),
    Line::Column(2),
    Line::Diagonal(0),
    Line::Diagonal(1),
];

impl Line {
    /// The three cells on this line, in drawing order
    pub fn cells(&self) -> [Pos; 3] {
        match *self {
            Line::Row(r) => [Pos::new(r, 0), Pos::new(r, 1), Pos::new(r, 2)],
            Line::Column(c) => [Pos::new(0, c), Pos::new(1, c), Pos::new(2, c)],
            Line::Diagonal(0) => [Pos::new(0, 0), Pos::new(1, 1), Pos::new(2, 2)],
            Line::Diagonal(_) => [Pos::new(2, 0), Pos::new(1, 1), Pos::new(0, 2)],
        }
    }

    /// Start and end cell of the strike-through
    pub fn endpoints(&self) -> (Pos, Pos) {
        let [start, _, end] = self.cells();
        (start, end)
    }

    /// Row, column or diagonal number
    pub fn index(&self) -> u8 {
        match *self {
            Line::Row(i) | Line::Column(i) | Line::Diagonal(i) => i,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(i) => write!(f, "horizontal{}", i),
            Line::Column(i) => write!(f, "vertical{}", i),
            Line::Diagonal(i) => write!(f, "diagonal{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_validity() {
        assert!(Pos::new(0, 0).is_valid());
        assert!(Pos::new(2, 2).is_valid());
        assert!(!Pos::new(3, 0).is_valid());
        assert!(Pos::try_new(1, 3).is_err());
        assert_eq!(Pos::try_new(1, 2).unwrap(), Pos::new(1, 2));
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, pos) in ALL_POSITIONS.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Pos::from_index(i).unwrap(), *pos);
        }
        assert!(Pos::from_index(9).is_err());
    }

    #[test]
    fn test_corners_and_center() {
        let corners: Vec<_> = ALL_POSITIONS.iter().filter(|p| p.is_corner()).collect();
        assert_eq!(corners.len(), 4);
        assert!(Pos::new(1, 1).is_center());
        assert!(!Pos::new(1, 1).is_corner());
    }

    #[test]
    fn test_line_cells() {
        assert_eq!(
            Line::Column(2).cells(),
            [Pos::new(0, 2), Pos::new(1, 2), Pos::new(2, 2)]
        );
        // Diagonal 1 is drawn from bottom-left up
        assert_eq!(
            Line::Diagonal(1).endpoints(),
            (Pos::new(2, 0), Pos::new(0, 2))
        );
    }

    #[test]
    fn test_line_names() {
        assert_eq!(Line::Row(2).to_string(), "horizontal2");
        assert_eq!(Line::Column(0).to_string(), "vertical0");
        assert_eq!(Line::Diagonal(1).to_string(), "diagonal1");
    }

    #[test]
    fn test_every_cell_on_some_line() {
        for pos in ALL_POSITIONS {
            assert!(LINES.iter().any(|l| l.cells().contains(&pos)));
        }
        // Center sits on four lines
        let center = LINES
            .iter()
            .filter(|l| l.cells().contains(&Pos::new(1, 1)))
            .count();
        assert_eq!(center, 4);
    }
}
