use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Open,
    Wall,
}

#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    #[error("grid has no rows or no columns")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unknown cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: char },

    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f64),
}

/// Built-in map: 1 = wall, 0 = open
const DEFAULT_MAP: [[u8; 15]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

pub const DEFAULT_TILE_SIZE: f64 = 64.0;

/// Glyph for a wall tile in the text form of a grid
pub const WALL_GLYPH: char = '■';
/// Glyph for an open tile in the text form of a grid
pub const OPEN_GLYPH: char = '□';

/// Static occupancy map in world units.
///
/// Cells are row-major. Every point outside `[0, cols*T) x [0, rows*T)`
/// counts as wall, so a map without an outer ring is still closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    tile_size: f64,
    cells: Vec<Cell>,
}

impl Grid {
    /// The built-in 11x15 level
    pub fn default_map(tile_size: f64) -> Result<Self, GridError> {
        let rows: Vec<&[u8]> = DEFAULT_MAP.iter().map(|row| row.as_slice()).collect();
        Self::from_rows(&rows, tile_size)
    }

    /// Create a grid from a table of 0 (open) / 1 (wall) values
    pub fn from_rows(rows: &[&[u8]], tile_size: f64) -> Result<Self, GridError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        let expected = rows.first().map(|r| r.len()).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(GridError::Ragged { row, expected, found: values.len() });
            }
            for (col, &value) in values.iter().enumerate() {
                cells.push(match value {
                    0 => Cell::Open,
                    1 => Cell::Wall,
                    other => {
                        return Err(GridError::InvalidCell {
                            row,
                            col,
                            value: char::from_digit(u32::from(other), 36).unwrap_or('?'),
                        })
                    }
                });
            }
        }

        Ok(Grid {
            rows: rows.len() as i32,
            cols: expected as i32,
            tile_size,
            cells,
        })
    }

    /// Parse a grid drawn with `■` (wall) and `□` (open).
    /// `#` and `.` are accepted as ASCII equivalents; blank lines are skipped.
    pub fn from_text(text: &str, tile_size: f64) -> Result<Self, GridError> {
        let mut table: Vec<Vec<u8>> = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = table.len();
            let mut values = Vec::new();
            for (col, ch) in line.chars().enumerate() {
                values.push(match ch {
                    WALL_GLYPH | '#' => 1,
                    OPEN_GLYPH | '.' => 0,
                    other => return Err(GridError::InvalidCell { row, col, value: other }),
                });
            }
            table.push(values);
        }
        let rows: Vec<&[u8]> = table.iter().map(Vec::as_slice).collect();
        Self::from_rows(&rows, tile_size)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// World width in world units (cols * T)
    pub fn width(&self) -> f64 {
        self.cols as f64 * self.tile_size
    }

    /// World height in world units (rows * T)
    pub fn height(&self) -> f64 {
        self.rows as f64 * self.tile_size
    }

    /// True if (x, y) lies inside `[0, width) x [0, height)`
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width() && y < self.height()
    }

    /// Check whether the tile at (col, row) is a wall.
    /// Out of range tiles are walls.
    pub fn is_wall_cell(&self, col: i32, row: i32) -> bool {
        self.cell(col, row) == Cell::Wall
    }

    /// Get the tile at (col, row), Wall when out of range
    pub fn cell(&self, col: i32, row: i32) -> Cell {
        if col < 0 || col >= self.cols || row < 0 || row >= self.rows {
            return Cell::Wall;
        }
        self.cells[self.get_id(col, row)]
    }

    /// Check if the world point (x, y) is blocked
    pub fn is_blocked(&self, x: f64, y: f64) -> bool {
        if !self.contains(x, y) {
            return true; // Outside the world (or NaN) is blocked
        }
        let (col, row) = self.tile_at(x, y);
        self.is_wall_cell(col, row)
    }

    /// Tile coordinates (col, row) containing a world point
    pub fn tile_at(&self, x: f64, y: f64) -> (i32, i32) {
        (
            (x / self.tile_size).floor() as i32,
            (y / self.tile_size).floor() as i32,
        )
    }

    /// Convert (col, row) to a cell index. Caller guarantees the tile is in range.
    fn get_id(&self, col: i32, row: i32) -> usize {
        (col + row * self.cols) as usize
    }

    /// Iterate over every tile as (col, row, cell)
    pub fn iter_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(id, &cell)| {
            let id = id as i32;
            (id % self.cols, id / self.cols, cell)
        })
    }

    /// Render the grid as text, marking `marker` (col, row) with `s`
    pub fn to_text(&self, marker: Option<(i32, i32)>) -> String {
        let mut result = String::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if marker == Some((col, row)) {
                    's'
                } else if self.is_wall_cell(col, row) {
                    WALL_GLYPH
                } else {
                    OPEN_GLYPH
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
