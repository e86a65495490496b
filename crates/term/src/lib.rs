//! Terminal front end.
//!
//! [`GameView`] lays a [`GameSnapshot`](blockfall_core::GameSnapshot) out on a
//! [`Frame`], and [`TerminalRenderer`] flushes frames to the terminal through
//! crossterm, writing only what changed since the previous frame. Board cells are
//! two columns wide to compensate for the glyph aspect ratio.

pub mod frame;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use frame::{Frame, Glyph, Pen, Weight};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
