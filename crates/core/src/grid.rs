//! Grid module - settled-cell occupancy of the playfield
//!
//! The grid is a fixed `width x height` board stored as a flat row-major
//! array of occupied flags. Coordinates: (x, y) where x grows to the right and
//! y grows downwards, both starting at 0.
//!
//! [`Grid::cell_index`] is the only place that turns coordinates into array
//! offsets; everything else goes through it, so out-of-range coordinates can
//! never reach the backing storage.

use thiserror::Error;

use crate::piece::Tetromino;

/// Errors raised while creating a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u16, height: u16 },
    #[error("failed to allocate a grid of {cells} cells")]
    Allocation { cells: usize },
}

/// The playfield - settled cells only, the falling piece is not stored here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of occupied flags, row-major order (y * width + x)
    cells: Vec<bool>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let len = width as usize * height as usize;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { cells: len })?;
        cells.resize(len, false);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether (x, y) names a cell of this grid
    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Row-major offset of (x, y), or `None` off the board
    #[inline(always)]
    pub fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Whether (x, y) is a settled cell.
    ///
    /// Coordinates off the board are not cells and report `false`; use
    /// [`Grid::contains`] to tell them apart from empty cells.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell_index(x, y).is_some_and(|idx| self.cells[idx])
    }

    /// Mark a single cell occupied. Returns false if (x, y) is off the board.
    pub fn fill(&mut self, x: i32, y: i32) -> bool {
        match self.cell_index(x, y) {
            Some(idx) => {
                self.cells[idx] = true;
                true
            }
            None => false,
        }
    }

    /// Check a hypothetical piece placement against the walls, the floor and
    /// the settled cells.
    ///
    /// Returns true on the first occupied window cell that lands off the
    /// board (including coordinates past the `i32` range) or on an occupied
    /// grid cell.
    pub fn would_collide(&self, piece: &Tetromino) -> bool {
        piece
            .cell_positions()
            .any(|cell| match cell.and_then(|(x, y)| self.cell_index(x, y)) {
                None => true,
                Some(idx) => self.cells[idx],
            })
    }

    /// Merge a piece's cells into the grid.
    ///
    /// Cells that land off the board are dropped. Locking the same piece twice
    /// leaves the grid unchanged the second time.
    pub fn lock(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.fill(x, y);
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Rows of occupied flags, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}
