//! Engine host module - a single-threaded event loop around the core game state.
//!
//! The core has no notion of time. This crate supplies the pieces a host needs to
//! drive it without platform timers:
//!
//! - [`GravityTimer`]: a cancellable one-shot timer. Every arm/cancel issues a new
//!   token, so a fire scheduled against an older piece state is recognised as stale.
//! - [`Session`]: owns a [`GameState`](blockfall_core::GameState), the gravity timer,
//!   an explicit event queue and a virtual clock. Events are processed one at a time,
//!   each as a complete read-validate-commit step.
//! - [`EngineConfig`]: tick interval and seed, from defaults or the environment.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{EngineConfig, Session};
//! use blockfall_types::GameAction;
//!
//! let mut session = Session::new(EngineConfig::default());
//! session.start();
//!
//! session.push_action(GameAction::MoveRight);
//! session.advance(0);
//! assert_eq!(session.game().active().x, 1);
//!
//! // One full tick of gravity.
//! session.advance(1200);
//! assert_eq!(session.game().active().y, 1);
//! ```

pub mod config;
pub mod session;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use session::{EngineEvent, Session, SessionEvent, StampedEvent};
pub use timer::{GravityTimer, TimerToken};
