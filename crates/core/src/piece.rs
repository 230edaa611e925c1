//! Falling piece value
//!
//! A [`Tetromino`] is a plain `Copy` value. Moves and rotations build new
//! candidate values; the session decides whether to keep them.

use arrayvec::ArrayVec;

use crate::shapes::{self, CellOffset};
use crate::types::{PieceKind, Rotation, SPAWN_POSITION};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Grid column of the window's left edge
    pub x: i32,
    /// Grid row of the window's top edge
    pub y: i32,
}

impl Tetromino {
    /// Create a new tetromino at the spawn position, facing north
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Same piece with its window at (x, y)
    pub fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Same piece in another orientation
    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Candidate shifted by (dx, dy), saturating at the `i32` limits
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        self.at(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Candidate turned one step clockwise in place
    pub fn rotated_cw(self) -> Self {
        self.with_rotation(self.rotation.rotate_cw())
    }

    /// Grid coordinates of every occupied cell, row-major within the window.
    ///
    /// A cell whose coordinates do not fit in `i32` is `None`; it lies off
    /// every grid.
    pub fn cell_positions(&self) -> impl Iterator<Item = Option<(i32, i32)>> {
        let (x, y) = (self.x, self.y);
        shapes::occupied_offsets(self.kind, self.rotation)
            .into_iter()
            .map(move |(col, row): CellOffset| Some((x.checked_add(col)?, y.checked_add(row)?)))
    }

    /// Grid coordinates of the occupied cells that fit in `i32`
    pub fn cells(&self) -> ArrayVec<(i32, i32), 16> {
        self.cell_positions().flatten().collect()
    }
}
