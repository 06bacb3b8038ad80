//! Board state: sides, cells and the 3x3 grid

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Pos, ALL_POSITIONS, BOARD_SIZE};
use crate::error::{EngineError, Result};

// ============================================================================
// CORE TYPES
// ============================================================================

/// One of the two sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human, marks with X
    Player,
    /// The engine, marks with O
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    /// Cell state this side leaves behind
    pub fn mark(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Computer => Cell::Computer,
        }
    }

    pub fn symbol(self) -> char {
        self.mark().symbol()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Computer => write!(f, "Computer"),
        }
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" | "human" | "x" => Ok(Side::Player),
            "computer" | "engine" | "o" => Ok(Side::Computer),
            other => Err(EngineError::Parse(format!("unknown side: {}", other))),
        }
    }
}

/// State of a single cell
///
/// The aliases accept the legacy string encoding ("", "X", "O").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(alias = "")]
    Empty,
    #[serde(alias = "X")]
    Player,
    #[serde(alias = "O")]
    Computer,
}

impl Cell {
    /// Side owning this cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Side::Player),
            Cell::Computer => Some(Side::Computer),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'X',
            Cell::Computer => 'O',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Player),
            'O' | 'o' | '0' => Some(Cell::Computer),
            _ => None,
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// The 3x3 grid (copy to snapshot)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "BoardRepr")]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from rows of cells
    pub fn from_cells(cells: [[Cell; 3]; 3]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    pub fn clear(&mut self, pos: Pos) {
        self.set(pos, Cell::Empty);
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    /// Mark a cell for `side`, refusing occupied or off-board cells
    pub fn place(&mut self, pos: Pos, side: Side) -> Result<()> {
        if !pos.is_valid() {
            return Err(EngineError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
        if !self.is_empty_at(pos) {
            return Err(EngineError::CellOccupied(pos));
        }
        self.set(pos, side.mark());
        Ok(())
    }

    /// Copy of this board with one more mark
    pub fn with_move(&self, pos: Pos, side: Side) -> Result<Self> {
        let mut next = *self;
        next.place(pos, side)?;
        Ok(next)
    }

    /// Empty cells in scan order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        ALL_POSITIONS.into_iter().filter(|&p| self.is_empty_at(p))
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    pub fn is_blank(&self) -> bool {
        ALL_POSITIONS.iter().all(|&p| self.is_empty_at(p))
    }

    /// Number of marks owned by `side`
    pub fn count(&self, side: Side) -> usize {
        let mark = side.mark();
        self.cells.iter().flatten().filter(|&&c| c == mark).count()
    }

    /// Mark counts differ by at most one
    pub fn is_legal_position(&self) -> bool {
        self.count(Side::Player).abs_diff(self.count(Side::Computer)) <= 1
    }

    /// Load from JSON file (row strings or a matrix of cell names)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let board = serde_json::from_str(&content)?;
        Ok(board)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn row_string(&self, row: usize) -> String {
        self.cells[row].iter().map(|c| c.symbol()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as usize {
            writeln!(f, "{}", self.row_string(row))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parse `"OO./XX./..."` (rows split by '/' or newlines) or a flat
    /// nine-character string
    fn from_str(s: &str) -> Result<Self> {
        let mut rows: Vec<&str> = s
            .split(|c: char| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();

        if rows.len() == 1 && rows[0].chars().count() == 9 {
            let flat = rows[0];
            let split = flat.char_indices().nth(3).map(|(i, _)| i).unwrap_or(0);
            let split2 = flat.char_indices().nth(6).map(|(i, _)| i).unwrap_or(0);
            rows = vec![&flat[..split], &flat[split..split2], &flat[split2..]];
        }

        parse_rows(&rows)
    }
}

fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Board> {
    if rows.len() != 3 {
        return Err(EngineError::Parse(format!(
            "expected 3 rows, found {}",
            rows.len()
        )));
    }

    let mut board = Board::new();
    for (r, row) in rows.iter().enumerate() {
        let symbols: Vec<char> = row.as_ref().trim().chars().collect();
        if symbols.len() != 3 {
            return Err(EngineError::Parse(format!(
                "row {} has {} cells, expected 3",
                r,
                symbols.len()
            )));
        }
        for (c, &symbol) in symbols.iter().enumerate() {
            let cell = Cell::from_symbol(symbol).ok_or_else(|| {
                EngineError::Parse(format!("unknown cell symbol {:?} in row {}", symbol, r))
            })?;
            board.cells[r][c] = cell;
        }
    }
    Ok(board)
}

// ============================================================================
// SERDE REPRESENTATION
// ============================================================================

/// Accepted JSON forms of a board
#[derive(Deserialize)]
#[serde(untagged)]
enum BoardRepr {
    Rows(Vec<String>),
    Matrix([[Cell; 3]; 3]),
}

impl TryFrom<BoardRepr> for Board {
    type Error = EngineError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        match repr {
            BoardRepr::Rows(rows) => parse_rows(&rows),
            BoardRepr::Matrix(cells) => Ok(Board::from_cells(cells)),
        }
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        (0..BOARD_SIZE as usize).map(|r| board.row_string(r)).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
