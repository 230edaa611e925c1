//! Shapes module - the tetromino shape table
//!
//! Every (kind, rotation) pair maps to a 4x4 occupancy pattern stored as a
//! 16-bit mask. Bit `row * 4 + col`, counted from the most significant bit,
//! marks an occupied cell. The encoding never leaves this module: callers ask
//! [`is_cell_occupied`] or [`occupied_offsets`].
//!
//! Rotations follow SRS boxes: I turns inside the full 4x4 window, O never
//! changes, and J, L, S, T, Z turn inside the top-left 3x3 box.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation, PIECE_WINDOW};

/// Offset of an occupied cell inside a piece window (col, row)
pub type CellOffset = (i32, i32);

/// Masks indexed by `[PieceKind::index()][Rotation::index()]`
static SHAPE_MASKS: [[u16; 4]; 7] = [
    // I
    [0x0F00, 0x2222, 0x00F0, 0x4444],
    // O
    [0x6600, 0x6600, 0x6600, 0x6600],
    // T
    [0x4E00, 0x4640, 0x0E40, 0x4C40],
    // S
    [0x6C00, 0x4620, 0x06C0, 0x8C40],
    // Z
    [0xC600, 0x2640, 0x0C60, 0x4C80],
    // J
    [0x8E00, 0x6440, 0x0E20, 0x44C0],
    // L
    [0x2E00, 0x4460, 0x0E80, 0xC440],
];

#[inline(always)]
pub(crate) fn mask(kind: PieceKind, rotation: Rotation) -> u16 {
    SHAPE_MASKS[kind.index()][rotation.index()]
}

#[inline(always)]
fn bit(col: i32, row: i32) -> u16 {
    0x8000 >> (row * PIECE_WINDOW + col)
}

/// Whether the cell at (col, row) of the piece window is part of the piece.
///
/// `col` and `row` must lie in `0..4`; anything else is a caller bug and
/// reads as empty in release builds.
pub fn is_cell_occupied(kind: PieceKind, rotation: Rotation, col: i32, row: i32) -> bool {
    let in_window = (0..PIECE_WINDOW).contains(&col) && (0..PIECE_WINDOW).contains(&row);
    debug_assert!(in_window, "cell ({col}, {row}) outside the piece window");
    in_window && mask(kind, rotation) & bit(col, row) != 0
}

/// Occupied (col, row) offsets of a shape, in row-major order.
pub fn occupied_offsets(kind: PieceKind, rotation: Rotation) -> ArrayVec<CellOffset, 16> {
    let m = mask(kind, rotation);
    let mut out = ArrayVec::new();
    for row in 0..PIECE_WINDOW {
        for col in 0..PIECE_WINDOW {
            if m & bit(col, row) != 0 {
                out.push((col, row));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate a mask 90° clockwise inside the top-left `size` x `size` box.
    fn rotate_mask_cw(m: u16, size: i32) -> u16 {
        let mut out = 0;
        for row in 0..size {
            for col in 0..size {
                if m & bit(col, row) != 0 {
                    out |= bit(size - 1 - row, col);
                }
            }
        }
        out
    }

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            for rotation in ROTATIONS {
                assert_eq!(
                    mask(kind, rotation).count_ones(),
                    4,
                    "{kind:?} {rotation:?}"
                );
                assert_eq!(occupied_offsets(kind, rotation).len(), 4);
            }
        }
    }

    #[test]
    fn rotations_are_clockwise_images() {
        for kind in PieceKind::ALL {
            for rotation in ROTATIONS {
                let current = mask(kind, rotation);
                let next = mask(kind, rotation.rotate_cw());
                match kind {
                    PieceKind::O => assert_eq!(current, next),
                    PieceKind::I => assert_eq!(rotate_mask_cw(current, 4), next, "{kind:?}"),
                    _ => assert_eq!(rotate_mask_cw(current, 3), next, "{kind:?} {rotation:?}"),
                }
            }
        }
    }

    #[test]
    fn msb_is_top_left() {
        // Z north: XX.. / .XX.
        assert!(is_cell_occupied(PieceKind::Z, Rotation::North, 0, 0));
        assert!(is_cell_occupied(PieceKind::Z, Rotation::North, 1, 0));
        assert!(!is_cell_occupied(PieceKind::Z, Rotation::North, 0, 1));
        assert!(is_cell_occupied(PieceKind::Z, Rotation::North, 2, 1));
        assert!(!is_cell_occupied(PieceKind::Z, Rotation::North, 3, 3));
    }

    #[test]
    fn i_north_is_row_one() {
        assert_eq!(
            occupied_offsets(PieceKind::I, Rotation::North).as_slice(),
            &[(0, 1), (1, 1), (2, 1), (3, 1)]
        );
    }
}
