//! Pieces module - the piece catalog and piece orientation
//!
//! Every piece is a 3x3 pattern placed by its centre cell (the pivot).
//! Patterns are indexed `blocks[i][j]` where `i` is the column and `j` the row,
//! so pattern cell `(i, j)` sits at offset `(i - 1, j - 1)` from the pivot.
//!
//! Canonical patterns are static; a [`GamePiece`] only carries its kind and a
//! rotation, and computes its oriented pattern on demand.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation, PIECE_COUNT, PIECE_SIZE};

/// 3x3 occupancy pattern, `blocks[column][row]`
pub type PieceBlocks = [[u8; PIECE_SIZE]; PIECE_SIZE];

/// Offsets of occupied cells relative to the pivot
pub type PieceCells = ArrayVec<(i32, i32), { PIECE_SIZE * PIECE_SIZE }>;

/// Canonical (North) pattern for a piece kind
pub fn get_blocks(kind: PieceKind) -> PieceBlocks {
    match kind {
        PieceKind::Line => [[0, 0, 0], [1, 1, 1], [0, 0, 0]],
        PieceKind::C => [[0, 0, 0], [1, 1, 1], [1, 0, 1]],
        PieceKind::Plus => [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
        PieceKind::Dot => [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
        PieceKind::Square => [[1, 1, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::L => [[0, 0, 0], [1, 1, 1], [0, 0, 1]],
        PieceKind::J => [[0, 0, 1], [1, 1, 1], [0, 0, 0]],
        PieceKind::S => [[0, 0, 0], [0, 1, 1], [1, 1, 0]],
        PieceKind::Z => [[1, 1, 0], [0, 1, 1], [0, 0, 0]],
        PieceKind::T => [[1, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::X => [[1, 0, 1], [0, 1, 0], [1, 0, 1]],
        PieceKind::Corner => [[0, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::InverseCorner => [[1, 0, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::Diagonal => [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
        PieceKind::Double => [[0, 1, 0], [0, 1, 0], [0, 0, 0]],
    }
}

/// Rotate a pattern a quarter turn clockwise (x right, y down)
pub fn rotate_blocks_cw(blocks: &PieceBlocks) -> PieceBlocks {
    let mut rotated = [[0u8; PIECE_SIZE]; PIECE_SIZE];
    for (i, column) in blocks.iter().enumerate() {
        for (j, &cell) in column.iter().enumerate() {
            rotated[PIECE_SIZE - 1 - j][i] = cell;
        }
    }
    rotated
}

/// Get the pattern for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceBlocks {
    let mut blocks = get_blocks(kind);
    for _ in 0..rotation.quarter_turns() {
        blocks = rotate_blocks_cw(&blocks);
    }
    blocks
}

/// A piece in play: fixed kind, mutable orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamePiece {
    kind: PieceKind,
    rotation: Rotation,
}

impl GamePiece {
    /// Create a piece of the given kind in its catalog orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    /// Create a piece by catalog index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`PIECE_COUNT`]; asking for a piece that
    /// does not exist is a caller bug.
    pub fn create(index: usize) -> Self {
        match PieceKind::from_index(index) {
            Some(kind) => Self::new(kind),
            None => panic!("piece index {} out of range 0..{}", index, PIECE_COUNT),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Cell value this piece writes into the grid
    pub fn value(&self) -> u8 {
        self.kind.value()
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Rotate a quarter turn clockwise
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// Rotate a quarter turn counter-clockwise
    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }

    /// Oriented 3x3 pattern
    pub fn blocks(&self) -> PieceBlocks {
        get_shape(self.kind, self.rotation)
    }

    /// Occupied cells as offsets from the pivot
    pub fn cells(&self) -> PieceCells {
        let mut cells = PieceCells::new();
        for (i, column) in self.blocks().iter().enumerate() {
            for (j, &cell) in column.iter().enumerate() {
                if cell != 0 {
                    cells.push((i as i32 - 1, j as i32 - 1));
                }
            }
        }
        cells
    }
}

impl fmt::Display for GamePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.as_str(), self.rotation.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_fifteen_distinct_patterns() {
        let mut seen = Vec::new();
        for kind in PieceKind::ALL {
            let blocks = get_blocks(kind);
            assert!(!seen.contains(&blocks), "{:?} duplicates another shape", kind);
            seen.push(blocks);
        }
        assert_eq!(seen.len(), PIECE_COUNT);
    }

    #[test]
    fn test_rotate_cw_moves_right_to_bottom() {
        // Single cell right of the pivot
        let blocks = [[0, 0, 0], [0, 0, 0], [0, 1, 0]];
        let rotated = rotate_blocks_cw(&blocks);
        assert_eq!(rotated, [[0, 0, 0], [0, 0, 1], [0, 0, 0]]);
    }

    #[test]
    fn test_rotation_keeps_cell_count() {
        for kind in PieceKind::ALL {
            let mut piece = GamePiece::new(kind);
            let count = piece.cells().len();
            for _ in 0..4 {
                piece.rotate();
                assert_eq!(piece.cells().len(), count);
            }
        }
    }

    #[test]
    fn test_ccw_undoes_cw() {
        let mut piece = GamePiece::new(PieceKind::L);
        let original = piece.blocks();
        piece.rotate();
        assert_ne!(piece.blocks(), original);
        piece.rotate_ccw();
        assert_eq!(piece.blocks(), original);
    }

    #[test]
    fn test_cells_are_pivot_relative() {
        let piece = GamePiece::new(PieceKind::Dot);
        assert_eq!(piece.cells().as_slice(), &[(0, 0)]);

        let double = GamePiece::new(PieceKind::Double);
        assert_eq!(double.cells().as_slice(), &[(-1, 0), (0, 0)]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_create_out_of_range_panics() {
        GamePiece::create(PIECE_COUNT);
    }
}
