//! Square tile grid with row-major cell identities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::validate_dimension;
use crate::error::{GameError, Result};

/// Smallest supported board side
pub const MIN_DIMENSION: usize = 2;

/// Largest supported board side
pub const MAX_DIMENSION: usize = 10;

/// Board side used when none is given
pub const DEFAULT_DIMENSION: usize = 4;

// ============================================================================
// DIRECTION
// ============================================================================

/// Direction tiles slide toward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order defeat detection checks them
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts direction words, browser arrow key names, and the usual
    /// `wasd` / `hjkl` letters.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        let direction = match key {
            "ArrowUp" => Direction::Up,
            "ArrowDown" => Direction::Down,
            "ArrowLeft" => Direction::Left,
            "ArrowRight" => Direction::Right,
            _ => match key.to_ascii_lowercase().as_str() {
                "up" | "w" | "k" => Direction::Up,
                "down" | "s" | "j" => Direction::Down,
                "left" | "a" | "h" => Direction::Left,
                "right" | "d" | "l" => Direction::Right,
                _ => return Err(GameError::UnknownDirection(s.to_string())),
            },
        };
        Ok(direction)
    }
}

// ============================================================================
// CELLS
// ============================================================================

/// Grid coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One grid slot
///
/// `id` is `row * dimension + col` and only serves as a stable key for
/// whoever draws the board. Gameplay never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub id: usize,
    pub value: Option<u64>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square grid of cells (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    dimension: usize,
    /// Row-major cells, `dimension * dimension` long
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `dimension` x `dimension` board
    pub fn new(dimension: usize) -> Result<Self> {
        validate_dimension(dimension)?;

        let cells = (0..dimension * dimension)
            .map(|id| Cell { id, value: None })
            .collect();

        Ok(Self { dimension, cells })
    }

    /// Build a board from explicit rows (`None` = empty)
    pub fn from_values(rows: &[Vec<Option<u64>>]) -> Result<Self> {
        let mut board = Self::new(rows.len())?;

        for (row, values) in rows.iter().enumerate() {
            if values.len() != board.dimension {
                return Err(GameError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    values.len(),
                    board.dimension
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                check_tile_value(value, row, col)?;
                let idx = board.index(row, col);
                board.cells[idx].value = value;
            }
        }

        Ok(board)
    }

    /// Build a board from rows of plain numbers where 0 means empty
    pub fn from_rows(rows: &[&[u64]]) -> Result<Self> {
        let rows: Vec<Vec<Option<u64>>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| (v != 0).then_some(v)).collect())
            .collect();
        Self::from_values(&rows)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Row-major snapshot of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.dimension)
    }

    /// Cell at (row, col), or `None` when off the board
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.dimension && col < self.dimension {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    /// Tile value at (row, col); `None` for empty or off-board
    pub fn value(&self, row: usize, col: usize) -> Option<u64> {
        self.get(row, col).and_then(|cell| cell.value)
    }

    /// Values as nested rows, handy for comparisons and fixtures
    pub fn values(&self) -> Vec<Vec<Option<u64>>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.value).collect())
            .collect()
    }

    /// Coordinates of every empty cell, row-major
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| self.position(idx))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Largest tile on the board
    pub fn max_value(&self) -> Option<u64> {
        self.cells.iter().filter_map(|cell| cell.value).max()
    }

    pub fn contains_value(&self, value: u64) -> bool {
        self.cells.iter().any(|cell| cell.value == Some(value))
    }

    /// Copy of this board with one cell's value replaced
    ///
    /// Off-board coordinates return an unchanged copy.
    pub fn with_value(&self, row: usize, col: usize, value: Option<u64>) -> Board {
        let mut board = self.clone();
        if row < self.dimension && col < self.dimension {
            let idx = board.index(row, col);
            board.cells[idx].value = value;
        }
        board
    }

    // ========================================================================
    // INDEXING
    // ========================================================================

    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.dimension + col
    }

    pub(crate) fn position(&self, idx: usize) -> Position {
        Position::new(idx / self.dimension, idx % self.dimension)
    }

    pub(crate) fn value_at(&self, idx: usize) -> Option<u64> {
        self.cells[idx].value
    }

    pub(crate) fn set_value_at(&mut self, idx: usize, value: Option<u64>) {
        self.cells[idx].value = value;
    }
}

/// Wire form of a board, checked before it becomes a `Board`
#[derive(Deserialize)]
struct BoardRepr {
    dimension: usize,
    cells: Vec<Cell>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let dimension = validate_dimension(repr.dimension)?;
        if repr.cells.len() != dimension * dimension {
            return Err(GameError::InvalidLayout(format!(
                "{} cells for a {}x{} board",
                repr.cells.len(),
                dimension,
                dimension
            )));
        }
        for (idx, cell) in repr.cells.iter().enumerate() {
            if cell.id != idx {
                return Err(GameError::InvalidLayout(format!(
                    "cell {} has id {}",
                    idx, cell.id
                )));
            }
            check_tile_value(cell.value, idx / dimension, idx % dimension)?;
        }

        Ok(Self {
            dimension,
            cells: repr.cells,
        })
    }
}

fn check_tile_value(value: Option<u64>, row: usize, col: usize) -> Result<()> {
    match value {
        Some(v) if v < 2 || !v.is_power_of_two() => Err(GameError::InvalidLayout(format!(
            "value {} at ({}, {}) is not a tile value",
            v, row, col
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
