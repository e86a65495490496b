//! Render projection - read-only paint queries for renderers
//!
//! Pure functions of a piece's current variant and offsets. The same query drives
//! the board overlay (absolute coordinates) and the lookahead preview, which is
//! evaluated over a 4x4 local window with the piece at the window origin.

use crate::pieces::ActivePiece;
use crate::types::{PieceColor, PieceId, PREVIEW_SIZE};

/// Number of tiles in the preview window
pub const PREVIEW_TILES: usize = (PREVIEW_SIZE as usize) * (PREVIEW_SIZE as usize);

/// Preview tiles, row-major (`index = row * 4 + col`)
pub type PreviewTiles = [Option<PieceColor>; PREVIEW_TILES];

/// Paint information for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub paint: bool,
    pub color: PieceColor,
    pub piece_id: PieceId,
}

/// Whether `piece` covers (col, row), with its color and identity
pub fn cell_at(piece: &ActivePiece, col: i16, row: i16) -> CellPaint {
    CellPaint {
        paint: piece.covers(col, row),
        color: piece.color(),
        piece_id: piece.id,
    }
}

/// Evaluate `piece`'s current variant over the 4x4 preview window.
///
/// The piece's own offsets are ignored: the preview always shows the variant
/// anchored at the window origin.
pub fn preview_tiles(piece: &ActivePiece) -> PreviewTiles {
    let local = ActivePiece {
        x: 0,
        y: 0,
        ..*piece
    };
    let mut tiles = [None; PREVIEW_TILES];
    for (i, tile) in tiles.iter_mut().enumerate() {
        let col = (i % PREVIEW_SIZE as usize) as i16;
        let row = (i / PREVIEW_SIZE as usize) as i16;
        let paint = cell_at(&local, col, row);
        if paint.paint {
            *tile = Some(paint.color);
        }
    }
    tiles
}
