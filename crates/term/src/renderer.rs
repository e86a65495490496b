//! Terminal output: raw-mode lifecycle and frame flushing.
//!
//! The renderer keeps the last frame it flushed. Each new frame is compared with it
//! row by row and only changed spans are written. The first frame, a size change and
//! [`TerminalRenderer::invalidate`] force a full repaint.

use std::io::{self, Write};
use std::iter;
use std::mem;
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Colors, Print, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::frame::{Frame, Glyph, Pen, Weight};
use crate::types::RgbTriple;

pub struct TerminalRenderer {
    out: io::Stdout,
    shown: Frame,
    stale: bool,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: Frame::default(),
            stale: true,
            bytes: Vec::new(),
        }
    }

    /// Raw mode on the alternate screen, cursor hidden
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize, for instance)
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Flush `frame`, then swap it with the previously shown frame.
    ///
    /// The caller gets the old frame back and redraws into it, so steady-state
    /// rendering does not allocate.
    pub fn draw_swap(&mut self, frame: &mut Frame) -> Result<()> {
        let same_size =
            self.shown.width() == frame.width() && self.shown.height() == frame.height();
        let shown = (same_size && !self.stale).then_some(&self.shown);

        self.bytes.clear();
        encode_frame(shown, frame, &mut self.bytes)?;
        self.flush()?;

        mem::swap(&mut self.shown, frame);
        self.stale = false;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode `next` as terminal commands. Without a `shown` frame the screen is
/// cleared and every glyph is written.
fn encode_frame(shown: Option<&Frame>, next: &Frame, out: &mut Vec<u8>) -> io::Result<()> {
    if shown.is_none() {
        out.queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen: Option<Pen> = None;
    for y in 0..next.height() {
        let Some(row) = next.row(y) else {
            break;
        };
        let before = shown.and_then(|frame| frame.row(y));
        for span in changed_spans(before, row) {
            out.queue(cursor::MoveTo(span.start as u16, y))?;
            for glyph in &row[span] {
                if pen != Some(glyph.pen) {
                    apply_pen(out, glyph.pen)?;
                    pen = Some(glyph.pen);
                }
                out.queue(Print(glyph.ch))?;
            }
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Column ranges where `next` differs from `before`. With no previous row the
/// whole row is one span.
fn changed_spans<'a>(
    before: Option<&'a [Glyph]>,
    next: &'a [Glyph],
) -> impl Iterator<Item = Range<usize>> + 'a {
    let differs = move |x: usize| before.map_or(true, |row| row.get(x) != next.get(x));
    let mut x = 0;
    iter::from_fn(move || {
        while x < next.len() && !differs(x) {
            x += 1;
        }
        if x == next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && differs(x) {
            x += 1;
        }
        Some(start..x)
    })
}

fn apply_pen(out: &mut Vec<u8>, pen: Pen) -> io::Result<()> {
    // Attribute reset also drops colors, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetColors(Colors::new(color(pen.fg), color(pen.bg))))?;
    match pen.weight {
        Weight::Normal => {}
        Weight::Bold => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        Weight::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }
    Ok(())
}

fn color((r, g, b): RgbTriple) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR_ALL: &str = "\x1b[2J";

    fn encoded(shown: Option<&Frame>, next: &Frame) -> String {
        let mut out = Vec::new();
        encode_frame(shown, next, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn spans_split_on_unchanged_glyphs() {
        let before = [Glyph::BLANK; 8];
        let mut next = before;
        for x in [1, 2, 5] {
            next[x] = Glyph::new('█', Pen::default());
        }
        let spans: Vec<_> = changed_spans(Some(&before[..]), &next).collect();
        assert_eq!(spans, vec![1..3, 5..6]);
    }

    #[test]
    fn identical_rows_have_no_spans() {
        let row = [Glyph::BLANK; 5];
        assert_eq!(changed_spans(Some(&row[..]), &row).count(), 0);
    }

    #[test]
    fn missing_previous_row_is_one_span() {
        let row = [Glyph::BLANK; 5];
        let spans: Vec<_> = changed_spans(None, &row).collect();
        assert_eq!(spans, vec![0..5]);
    }

    #[test]
    fn full_repaint_clears_and_writes_every_row() {
        let mut frame = Frame::new(2, 2);
        frame.text(0, 0, "AB", Pen::default());
        frame.text(0, 1, "CD", Pen::default());

        let text = encoded(None, &frame);
        assert!(text.contains(CLEAR_ALL));
        assert!(text.contains("AB"));
        assert!(text.contains("CD"));
    }

    #[test]
    fn incremental_repaint_writes_only_changes() {
        let shown = Frame::new(6, 2);
        let mut next = shown.clone();
        next.draw(3, 1, 'X', Pen::default().bold());

        let text = encoded(Some(&shown), &next);
        assert!(!text.contains(CLEAR_ALL));
        assert_eq!(text.matches('X').count(), 1);
        // Cursor goes straight to row 2, column 4 (1-based).
        assert!(text.contains("\x1b[2;4H"));
        assert!(encoded(Some(&shown), &shown.clone()).chars().all(|c| c != ' '));
    }
}
