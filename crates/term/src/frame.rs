//! Character frames: the grid of styled glyphs the game view draws into and the
//! renderer flushes to the terminal.

use crate::types::RgbTriple;

/// Default foreground
pub const INK: RgbTriple = (220, 220, 220);
/// Default background
pub const PAPER: RgbTriple = (0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

/// Colors and emphasis a glyph is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub fg: RgbTriple,
    pub bg: RgbTriple,
    pub weight: Weight,
}

impl Pen {
    pub const fn new(fg: RgbTriple, bg: RgbTriple) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            weight: Weight::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            weight: Weight::Dim,
            ..self
        }
    }

    pub const fn with_fg(self, fg: RgbTriple) -> Self {
        Self { fg, ..self }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(INK, PAPER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub pen: Pen,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::new(' ', Pen::new(INK, PAPER));

    pub const fn new(ch: char, pen: Pen) -> Self {
        Self { ch, pen }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A `width` x `height` grid of glyphs, stored row-major.
///
/// Every drawing call clips at the edges, so callers can lay out against a
/// nominal size and let small terminals cut the picture off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let mut frame = Self::default();
        frame.reset(width, height);
        frame
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Take the given size and blank every glyph. The allocation is reused.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(width as usize * height as usize, Glyph::BLANK);
    }

    /// One row of glyphs, or `None` below the last row
    pub fn row(&self, y: u16) -> Option<&[Glyph]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.glyphs.get(start..start + self.width as usize)
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y)?.get(x as usize).copied()
    }

    pub fn draw(&mut self, x: u16, y: u16, ch: char, pen: Pen) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = y as usize * self.width as usize + x as usize;
        self.glyphs[i] = Glyph::new(ch, pen);
    }

    /// Write `text` left to right and return the column after its last glyph.
    pub fn text(&mut self, x: u16, y: u16, text: &str, pen: Pen) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            self.draw(col, y, ch, pen);
            col += 1;
        }
        col
    }

    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, pen: Pen) {
        let right = x.saturating_add(w).min(self.width);
        let bottom = y.saturating_add(h).min(self.height);
        for row in y..bottom {
            for col in x..right {
                self.draw(col, row, ch, pen);
            }
        }
    }

    /// Box-drawing outline around a `w` x `h` rectangle; anything under 2x2 is skipped
    pub fn outline(&mut self, x: u16, y: u16, w: u16, h: u16, pen: Pen) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        let (inner_x, inner_y) = (x.saturating_add(1), y.saturating_add(1));
        self.fill(inner_x, y, w - 2, 1, '─', pen);
        self.fill(inner_x, bottom, w - 2, 1, '─', pen);
        self.fill(x, inner_y, 1, h - 2, '│', pen);
        self.fill(right, inner_y, 1, h - 2, '│', pen);
        for (col, row, ch) in [
            (x, y, '┌'),
            (right, y, '┐'),
            (x, bottom, '└'),
            (right, bottom, '┘'),
        ] {
            self.draw(col, row, ch, pen);
        }
    }
}
