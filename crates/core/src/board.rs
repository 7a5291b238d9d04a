//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of color indices (0 = empty, 1..=7 piece colors,
//! 8 for the game-over fill). Uses a flat array for cache locality and
//! zero-allocation. Coordinates: (x, y) where x ranges 0..9 (left to right),
//! y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row-major grid of color indices, `grid[y][x]`
pub type Grid = [[Color; WIDTH]; HEIGHT];

/// Row indices, at most one per board row
pub type RowList = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Color; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Build a board from a row-major grid
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Color> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, color: Color) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Check if every cell of `shape` at origin (x, y) is in bounds and empty
    ///
    /// Origins far enough out that a cell coordinate overflows `i8` never fit.
    pub fn can_place(&self, shape: &[(i8, i8)], x: i8, y: i8) -> bool {
        shape.iter().all(|&(dx, dy)| {
            match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(cx), Some(cy)) => self.is_valid(cx, cy),
                _ => false,
            }
        })
    }

    fn row(&self, y: usize) -> &[Color] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    fn row_mut(&mut self, y: usize) -> &mut [Color] {
        &mut self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Check if a row has no empty cells
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|&c| c != EMPTY)
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows and compact the rest downward
    ///
    /// Kept rows are copied bottom-up into the next free slot, preserving
    /// their order; vacated rows at the top are zero-filled. Out-of-range
    /// indices are ignored and an empty list leaves the board untouched.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let mut remove = [false; HEIGHT];
        for &y in rows {
            if y < HEIGHT {
                remove[y] = true;
            }
        }

        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                // copy_within handles overlap, no allocation
                self.cells
                    .copy_within(read_y * WIDTH..(read_y + 1) * WIDTH, write_y * WIDTH);
            }
        }

        for y in 0..write_y {
            self.row_mut(y).fill(EMPTY);
        }
    }

    /// Write a piece's cells with the given color
    ///
    /// Cells outside the board are skipped; no overlap check is made.
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, color: Color) {
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, color);
        }
    }

    /// Fill every empty cell of row `y` with `color`
    pub fn fill_empty_in_row(&mut self, y: usize, color: Color) {
        if y >= HEIGHT {
            return;
        }
        for cell in self.row_mut(y).iter_mut().filter(|c| **c == EMPTY) {
            *cell = color;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Copy the board into a row-major grid
    pub fn write_grid(&self, out: &mut Grid) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    pub fn to_grid(&self) -> Grid {
        let mut grid = [[EMPTY; WIDTH]; HEIGHT];
        self.write_grid(&mut grid);
        grid
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
