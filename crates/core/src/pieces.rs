//! Pieces module - shape catalog and the active piece
//!
//! Rotation states are enumerated per shape rather than computed, so every shape
//! has its own number of variants and its own (deliberately uneven) pivot behaviour.
//! A piece's rotation index is a free-running counter: it selects
//! `variants[rotation % variants.len()]`, so it can never be out of range.

use crate::types::{PieceColor, PieceId, ShapeKind, PREVIEW_SIZE, SHAPE_COUNT};

/// Offset of a single cell relative to the piece origin, as (column, row)
pub type CellOffset = (i8, i8);

/// One rotation variant - exactly 4 cell offsets
pub type Variant = [CellOffset; 4];

/// Immutable shape definition
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub name: &'static str,
    pub color: PieceColor,
    pub variants: &'static [Variant],
}

impl Shape {
    /// Number of rotation variants
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Variant selected by a (wrapping) rotation index
    pub fn variant(&self, rotation: u32) -> &'static Variant {
        &self.variants[rotation as usize % self.variants.len()]
    }
}

const LINE_VARIANTS: [Variant; 2] = [
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
];

const MIRRORED_L_VARIANTS: [Variant; 4] = [
    [(1, 0), (1, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 0)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
];

const L_VARIANTS: [Variant; 4] = [
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 0), (2, 0)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 0)],
];

const SQUARE_VARIANTS: [Variant; 1] = [[(0, 0), (0, 1), (1, 0), (1, 1)]];

const S_VARIANTS: [Variant; 2] = [
    [(1, 0), (0, 1), (1, 1), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const TRIANGLE_VARIANTS: [Variant; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 0)],
    [(1, 0), (1, 1), (0, 1), (1, 2)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (0, 2)],
];

const Z_VARIANTS: [Variant; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (0, 1), (0, 2)],
];

/// The piece catalog, indexed by `ShapeKind::index()`
pub static CATALOG: [Shape; SHAPE_COUNT] = [
    Shape {
        kind: ShapeKind::Line,
        name: "line",
        color: PieceColor::Cyan,
        variants: &LINE_VARIANTS,
    },
    Shape {
        kind: ShapeKind::MirroredL,
        name: "mirrored L",
        color: PieceColor::Blue,
        variants: &MIRRORED_L_VARIANTS,
    },
    Shape {
        kind: ShapeKind::L,
        name: "L",
        color: PieceColor::Orange,
        variants: &L_VARIANTS,
    },
    Shape {
        kind: ShapeKind::Square,
        name: "square",
        color: PieceColor::Yellow,
        variants: &SQUARE_VARIANTS,
    },
    Shape {
        kind: ShapeKind::S,
        name: "s",
        color: PieceColor::Green,
        variants: &S_VARIANTS,
    },
    Shape {
        kind: ShapeKind::Triangle,
        name: "triangle",
        color: PieceColor::Violet,
        variants: &TRIANGLE_VARIANTS,
    },
    Shape {
        kind: ShapeKind::Z,
        name: "z",
        color: PieceColor::Red,
        variants: &Z_VARIANTS,
    },
];

/// Look up a shape definition
pub fn shape(kind: ShapeKind) -> &'static Shape {
    &CATALOG[kind.index()]
}

/// Get the offsets for a shape and (wrapping) rotation index
pub fn get_variant(kind: ShapeKind, rotation: u32) -> Variant {
    *shape(kind).variant(rotation)
}

/// A live instantiation of a shape: placement plus identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub x: i8,
    pub y: i8,
    pub rotation: u32,
    pub id: PieceId,
}

impl ActivePiece {
    /// Create a piece at the local origin with rotation 0
    pub fn new(kind: ShapeKind, id: PieceId) -> Self {
        Self {
            kind,
            x: 0,
            y: 0,
            rotation: 0,
            id,
        }
    }

    /// The deterministic placeholder: first shape, no identity
    pub fn placeholder() -> Self {
        Self::new(ShapeKind::from_index(0), PieceId::NONE)
    }

    pub fn shape(&self) -> &'static Shape {
        shape(self.kind)
    }

    pub fn color(&self) -> PieceColor {
        self.shape().color
    }

    /// Offsets of the current rotation variant
    pub fn variant(&self) -> Variant {
        get_variant(self.kind, self.rotation)
    }

    /// Absolute (column, row) coordinates of the four cells
    ///
    /// Computed in `i16` so that candidates far outside the board never overflow.
    pub fn cells(&self) -> [(i16, i16); 4] {
        self.variant().map(|(dx, dy)| {
            (
                self.x as i16 + dx as i16,
                self.y as i16 + dy as i16,
            )
        })
    }

    /// Whether the piece covers (col, row)
    pub fn covers(&self, col: i16, row: i16) -> bool {
        self.cells().iter().any(|&(x, y)| x == col && y == row)
    }

    /// Candidate translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Candidate advanced to the next rotation variant
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.wrapping_add(1),
            ..*self
        }
    }
}

/// Whether every variant fits the catalog invariants (4 cells, non-negative,
/// inside the preview window, no duplicates)
pub fn variant_is_well_formed(variant: &Variant) -> bool {
    let in_box = variant.iter().all(|&(x, y)| {
        x >= 0 && y >= 0 && (x as u8) < PREVIEW_SIZE && (y as u8) < PREVIEW_SIZE
    });
    let distinct = variant
        .iter()
        .enumerate()
        .all(|(i, a)| variant[i + 1..].iter().all(|b| a != b));
    in_box && distinct
}
