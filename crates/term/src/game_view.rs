//! GameView: lays a `core::GameSnapshot` out on a terminal [`Frame`].
//!
//! Pure drawing, no I/O, so every layout rule is unit-testable.

use crate::core::{cell_at, ActivePiece, GameSnapshot};
use crate::frame::{Frame, Pen, INK, PAPER};
use crate::types::{PieceColor, RgbTriple, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_SIZE};

const WELL_BG: RgbTriple = (30, 30, 40);
const BORDER: Pen = Pen::new((200, 200, 200), PAPER);
const EMPTY: Pen = Pen::new((90, 90, 100), WELL_BG).dim();
const LABEL: Pen = Pen::new(INK, PAPER).bold();
const VALUE: Pen = Pen::new((200, 200, 200), PAPER);
const BLOCK: char = '█';

/// Panel columns needed before the side panel is drawn at all
const MIN_PANEL_WIDTH: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board layout: how many terminal columns and rows one board cell takes, and
/// where the well sits vertically.
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square in most fonts.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered well in terminal cells
    fn well_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Terminal position of the top-left border corner of the well.
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (well_w, well_h) = self.well_size();
        let x = viewport.width.saturating_sub(well_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(well_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Redraw `frame` from scratch at the viewport size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, frame: &mut Frame) {
        frame.reset(viewport.width, viewport.height);

        let (left, top) = self.board_origin(viewport);
        let (well_w, well_h) = self.well_size();
        frame.outline(left, top, well_w, well_h, BORDER);

        // The snapshot board already carries the active footprint; the overlay
        // only draws those cells bold.
        let active = ActivePiece::from(snap.active);
        for row in 0..BOARD_HEIGHT as u16 {
            for col in 0..BOARD_WIDTH as u16 {
                let overlay = cell_at(&active, col as i16, row as i16);
                let (ch, pen) = if snap.started && overlay.paint {
                    (BLOCK, block_pen(overlay.color).bold())
                } else if let Some(cell) = snap.cell(col as usize, row as usize) {
                    (BLOCK, block_pen(cell.color))
                } else {
                    ('·', EMPTY)
                };
                let x = left + 1 + col * self.cell_w;
                let y = top + 1 + row * self.cell_h;
                frame.fill(x, y, self.cell_w, self.cell_h, ch, pen);
            }
        }

        let panel_x = left.saturating_add(well_w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) >= MIN_PANEL_WIDTH {
            self.draw_panel(frame, snap, panel_x, top);
        }

        if !snap.started {
            let text = "READY";
            let x = left + well_w.saturating_sub(text.len() as u16) / 2;
            frame.text(x, top + well_h / 2, text, LABEL.with_fg((255, 255, 255)));
        }
    }

    /// Allocate a frame and render into it.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let mut frame = Frame::default();
        self.render_into(snap, viewport, &mut frame);
        frame
    }

    fn draw_panel(&self, frame: &mut Frame, snap: &GameSnapshot, x: u16, top: u16) {
        let mut y = top;
        frame.text(x, y, "NEXT", LABEL);
        y += 1;

        let size = PREVIEW_SIZE as u16;
        let (box_w, box_h) = (size * self.cell_w + 2, size * self.cell_h + 2);
        frame.outline(x, y, box_w, box_h, VALUE);
        for (i, tile) in snap.next_tiles.iter().enumerate() {
            let (col, row) = (i as u16 % size, i as u16 / size);
            let (ch, pen) = match tile {
                Some(color) => (BLOCK, VALUE.with_fg(color.rgb())),
                None => (' ', VALUE),
            };
            frame.fill(
                x + 1 + col * self.cell_w,
                y + 1 + row * self.cell_h,
                self.cell_w,
                self.cell_h,
                ch,
                pen,
            );
        }
        y = y.saturating_add(box_h + 1);

        for (label, value) in [("PIECES", snap.locked_count), ("LINES", snap.cleared_count)] {
            frame.text(x, y, label, LABEL);
            frame.text(x, y.saturating_add(1), &value.to_string(), VALUE);
            y = y.saturating_add(3);
        }

        for (i, hint) in ["←→↓ move", "space rotate", "q quit"].into_iter().enumerate() {
            frame.text(x, y.saturating_add(i as u16), hint, VALUE.dim());
        }
    }
}

fn block_pen(color: PieceColor) -> Pen {
    Pen::new(color.rgb(), WELL_BG)
}
