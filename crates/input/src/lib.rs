//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! repeat handling of our own: terminal auto-repeat events are forwarded like
//! presses, and every one of them becomes an independent action.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_key_down, should_quit};
