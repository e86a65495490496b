//! Terminal runner (default binary).
//!
//! Drives an engine [`Session`] from crossterm key events and the wall clock, and
//! renders it through the terminal front end.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::engine::{EngineConfig, Session};
use blockfall::input::{handle_key_event, is_key_down, should_quit};
use blockfall::term::{Frame, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut session = Session::new(EngineConfig::from_env());
    session.start();

    let view = GameView::default();
    let mut frame = Frame::default();
    let mut snapshot = session.snapshot();

    let origin = Instant::now();
    let frame_period = Duration::from_millis(FRAME_MS as u64);

    loop {
        // Render.
        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut frame);
        term.draw_swap(&mut frame)?;

        // Input until the next frame; key events are handled in arrival order.
        let frame_end = Instant::now() + frame_period;
        loop {
            let timeout = frame_end.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if is_key_down(key.kind) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        // Catch gravity up to now before the key is applied.
                        session.advance_to(origin.elapsed().as_millis() as u64);
                        session.push_action(action);
                        session.advance(0);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        session.advance_to(origin.elapsed().as_millis() as u64);
        session.take_events();
    }
}
