//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the state engine of the game: piece catalog, spawning, move
//! validation, gravity with locking, and the line-clear sweep.
//! It has **zero dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is a plain function or method call
//! - **Portable**: Can run in any host (terminal loop, async task, headless)
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven-shape catalog with enumerated rotation variants, and [`ActivePiece`]
//! - [`rng`]: seeded shape selection, identity generation and [`PieceSpawner`]
//! - [`board`]: 10x20 grid with validation, identity-aware painting and the row sweep
//! - [`game_state`]: the gravity controller owning board, active and lookahead pieces
//! - [`projection`]: read-only paint queries for renderers
//! - [`snapshot`]: copyable read model for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, MoveOutcome, TickOutcome};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // The piece spawns against the left wall.
//! assert_eq!(game.apply_action(GameAction::MoveLeft), MoveOutcome::Rejected);
//! assert_eq!(game.apply_action(GameAction::MoveRight), MoveOutcome::Moved);
//!
//! // Gravity on an empty board descends.
//! assert!(matches!(game.gravity_step(), TickOutcome::Descended { .. }));
//! ```
//!
//! # Timing
//!
//! The core has no clock. Hosts call [`GameState::gravity_step`] on their own cadence
//! (1200ms by default, see `blockfall_types::GRAVITY_TICK_MS`).

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod projection;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use game_state::{GameState, GravityPhase, LockEvent, MoveOutcome, TickOutcome};
pub use pieces::{get_variant, shape, ActivePiece, Shape, Variant, CATALOG};
pub use projection::{cell_at, preview_tiles, CellPaint, PreviewTiles};
pub use rng::{PieceIds, PieceSpawner, ShapeSource, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
