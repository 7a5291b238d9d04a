//! Pieces module - Tetromino shapes and rotation with horizontal wall kicks
//!
//! Every piece has four rotation slots of four `(x, y)` cell offsets each.
//! Only the first `rotation_count` slots are distinct; the rest repeat them
//! so any slot index 0..4 is always a valid lookup.

use crate::types::{PieceKind, PIECE_TYPES, WALL_KICK_OFFSETS};

/// Offset of a single cell relative to the piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the piece origin
pub type PieceShape = [MinoOffset; 4];

/// Immutable shape data for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    /// Number of distinct orientations (1, 2 or 4)
    pub rotation_count: u8,
    pub rotations: [PieceShape; 4],
}

/// Shape table indexed by `PieceKind::index()`
pub static PIECES: [PieceDef; PIECE_TYPES] = [
    // O
    PieceDef {
        rotation_count: 1,
        rotations: [
            [(0, 0), (1, 0), (0, 1), (1, 1)],
            [(0, 0), (1, 0), (0, 1), (1, 1)],
            [(0, 0), (1, 0), (0, 1), (1, 1)],
            [(0, 0), (1, 0), (0, 1), (1, 1)],
        ],
    },
    // Z
    PieceDef {
        rotation_count: 2,
        rotations: [
            [(0, 1), (1, 1), (1, 0), (2, 0)],
            [(0, 0), (0, 1), (1, 1), (1, 2)],
            [(0, 1), (1, 1), (1, 0), (2, 0)],
            [(0, 0), (0, 1), (1, 1), (1, 2)],
        ],
    },
    // S
    PieceDef {
        rotation_count: 2,
        rotations: [
            [(0, 0), (1, 0), (1, 1), (2, 1)],
            [(1, 0), (1, 1), (0, 1), (0, 2)],
            [(0, 0), (1, 0), (1, 1), (2, 1)],
            [(1, 0), (1, 1), (0, 1), (0, 2)],
        ],
    },
    // I: vertical in slot 0
    PieceDef {
        rotation_count: 2,
        rotations: [
            [(1, 0), (1, 1), (1, 2), (1, 3)],
            [(0, 0), (1, 0), (2, 0), (3, 0)],
            [(1, 0), (1, 1), (1, 2), (1, 3)],
            [(0, 0), (1, 0), (2, 0), (3, 0)],
        ],
    },
    // L
    PieceDef {
        rotation_count: 4,
        rotations: [
            [(1, 2), (1, 1), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1), (2, 2)],
            [(0, 2), (1, 2), (1, 1), (1, 0)],
            [(0, 0), (0, 1), (1, 1), (2, 1)],
        ],
    },
    // J
    PieceDef {
        rotation_count: 4,
        rotations: [
            [(0, 0), (1, 0), (1, 1), (1, 2)],
            [(0, 1), (1, 1), (2, 1), (2, 0)],
            [(1, 0), (1, 1), (1, 2), (2, 2)],
            [(0, 2), (0, 1), (1, 1), (2, 1)],
        ],
    },
    // T
    PieceDef {
        rotation_count: 4,
        rotations: [
            [(1, 0), (0, 1), (1, 1), (2, 1)],
            [(2, 1), (1, 0), (1, 1), (1, 2)],
            [(1, 2), (0, 1), (1, 1), (2, 1)],
            [(0, 1), (1, 0), (1, 1), (1, 2)],
        ],
    },
];

/// Shape definition for a piece kind
pub fn piece_def(kind: PieceKind) -> &'static PieceDef {
    &PIECES[kind.index()]
}

/// Get the cell offsets for a piece kind and rotation slot
///
/// Slots wrap modulo 4.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    piece_def(kind).rotations[(rotation % 4) as usize]
}

/// Number of distinct orientations of a piece kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    piece_def(kind).rotation_count
}

/// Rotation index reached from `rotation` by `delta` steps
///
/// Always in `0..rotation_count`, for negative deltas too.
pub fn rotated_index(kind: PieceKind, rotation: u8, delta: i8) -> u8 {
    let frames = rotation_count(kind) as i16;
    ((frames + rotation as i16 + delta as i16).rem_euclid(frames)) as u8
}

/// Try to rotate a piece, kicking horizontally when blocked
///
/// `fits(x, y, rotation)` must report whether the whole piece fits at that
/// origin and rotation. Offsets from [`WALL_KICK_OFFSETS`] are tried in order
/// at the unchanged row. Returns the new rotation and the accepted column
/// offset, or `None` when every offset is blocked.
pub fn try_rotate(
    kind: PieceKind,
    rotation: u8,
    x: i8,
    y: i8,
    delta: i8,
    fits: impl Fn(i8, i8, u8) -> bool,
) -> Option<(u8, i8)> {
    let new_rotation = rotated_index(kind, rotation, delta);

    WALL_KICK_OFFSETS
        .iter()
        .copied()
        .find(|&dx| fits(x + dx, y, new_rotation))
        .map(|dx| (new_rotation, dx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_counts_match_symmetry() {
        assert_eq!(rotation_count(PieceKind::O), 1);
        assert_eq!(rotation_count(PieceKind::Z), 2);
        assert_eq!(rotation_count(PieceKind::S), 2);
        assert_eq!(rotation_count(PieceKind::I), 2);
        assert_eq!(rotation_count(PieceKind::L), 4);
        assert_eq!(rotation_count(PieceKind::J), 4);
        assert_eq!(rotation_count(PieceKind::T), 4);
    }

    #[test]
    fn every_shape_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rotation in 0..4 {
                let shape = get_shape(kind, rotation);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} r{}", kind, rotation);
                    }
                }
                assert!(shape.iter().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)));
            }
        }
    }

    #[test]
    fn repeated_slots_mirror_distinct_frames() {
        for kind in PieceKind::ALL {
            let count = rotation_count(kind);
            for rotation in count..4 {
                assert_eq!(get_shape(kind, rotation), get_shape(kind, rotation % count));
            }
        }
    }

    #[test]
    fn rotated_index_wraps_both_ways() {
        assert_eq!(rotated_index(PieceKind::T, 3, 1), 0);
        assert_eq!(rotated_index(PieceKind::T, 0, -1), 3);
        assert_eq!(rotated_index(PieceKind::I, 1, 1), 0);
        assert_eq!(rotated_index(PieceKind::I, 0, -1), 1);
        assert_eq!(rotated_index(PieceKind::O, 0, 1), 0);
        assert_eq!(rotated_index(PieceKind::O, 0, -1), 0);
    }

    #[test]
    fn try_rotate_prefers_unkicked_position() {
        let result = try_rotate(PieceKind::T, 0, 4, 5, 1, |_, _, _| true);
        assert_eq!(result, Some((1, 0)));
    }

    #[test]
    fn try_rotate_follows_kick_order() {
        // Only a kick of +2 fits.
        let result = try_rotate(PieceKind::L, 2, 4, 5, -1, |x, _, _| x == 6);
        assert_eq!(result, Some((1, 2)));

        // -1 is tried before +1.
        let result = try_rotate(PieceKind::L, 2, 4, 5, 1, |x, _, _| x == 3 || x == 5);
        assert_eq!(result, Some((3, -1)));
    }

    #[test]
    fn try_rotate_never_kicks_vertically() {
        let result = try_rotate(PieceKind::J, 0, 4, 5, 1, |_, y, _| y != 5);
        assert_eq!(result, None);
    }
}
