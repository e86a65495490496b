//! Runtime module - async host for one game session
//!
//! The engine [`Session`](blockfall_engine::Session) is single-threaded: every
//! stimulus is processed to completion before the next. This crate runs it inside a
//! dedicated tokio task so that any number of producers (key readers, scripted
//! clients, tests) can feed it without ever interleaving two read-validate-commit
//! sequences.
//!
//! # Message Flow
//!
//! ```text
//! EngineHandle --RuntimeCommand--> actor task (owns Session)
//!                                   |  select! { command, sleep_until(gravity deadline) }
//!                                   +--LogRecord--> log task --> JSONL file
//! ```
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_TICK_MS`: gravity interval (default 1200)
//! - `BLOCKFALL_SEED`: shape seed (default derived from the clock)
//! - `BLOCKFALL_MAX_PENDING`: command channel capacity (default 64)
//! - `BLOCKFALL_LOG_PATH`: append-only JSONL event log (disabled when unset)
//!
//! # Example
//!
//! ```no_run
//! use blockfall_runtime::{spawn_session, RuntimeConfig};
//! use blockfall_runtime::types::GameAction;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let handle = spawn_session(RuntimeConfig::from_env());
//! handle.send_action(GameAction::MoveRight).await?;
//! let snapshot = handle.snapshot().await?;
//! println!("active piece at x={}", snapshot.active.x);
//! let summary = handle.shutdown().await?;
//! println!("{} pieces locked", summary.locked_count);
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod log;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use actor::{spawn_session, EngineHandle, RuntimeCommand, SessionSummary};
pub use config::RuntimeConfig;
pub use log::{EventLog, LogRecord, PieceRecord};
