//! Session actor
//!
//! One tokio task owns the [`Session`]. Commands arrive over a bounded `mpsc`
//! channel; the gravity deadline is awaited with `sleep_until`. Whichever comes
//! first is handled to completion before the loop selects again.

use std::future;

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use blockfall_core::GameSnapshot;
use blockfall_engine::{EngineConfig, Session};
use blockfall_types::GameAction;

use crate::config::RuntimeConfig;
use crate::log::{EventLog, LogRecord};

/// Message sent to the actor
#[derive(Debug)]
pub enum RuntimeCommand {
    Key(GameAction),
    Snapshot(oneshot::Sender<GameSnapshot>),
    Shutdown,
}

/// Totals reported when the actor stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub locked_count: u32,
    pub cleared_count: u32,
    /// Session clock at shutdown, in milliseconds
    pub elapsed_ms: u64,
}

/// Cloneable sender side plus the actor's join handle
#[derive(Debug)]
pub struct EngineHandle {
    tx: mpsc::Sender<RuntimeCommand>,
    task: JoinHandle<SessionSummary>,
}

impl EngineHandle {
    /// Queue a player action, waiting while the channel is full
    pub async fn send_action(&self, action: GameAction) -> Result<()> {
        self.tx
            .send(RuntimeCommand::Key(action))
            .await
            .map_err(|_| anyhow!("session task has stopped"))
    }

    /// Queue a player action without waiting; fails when the channel is full
    pub fn try_send_action(&self, action: GameAction) -> Result<()> {
        self.tx
            .try_send(RuntimeCommand::Key(action))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => anyhow!("command queue is full"),
                mpsc::error::TrySendError::Closed(_) => anyhow!("session task has stopped"),
            })
    }

    /// Snapshot taken after every command sent before it has been processed
    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(RuntimeCommand::Snapshot(reply_tx))
            .await
            .map_err(|_| anyhow!("session task has stopped"))?;
        reply_rx.await.context("session task dropped snapshot request")
    }

    /// A raw sender for producers that outlive this handle
    pub fn sender(&self) -> mpsc::Sender<RuntimeCommand> {
        self.tx.clone()
    }

    /// Stop the actor and wait for it to finish
    pub async fn shutdown(self) -> Result<SessionSummary> {
        // The actor may already be gone if every sender was dropped.
        let _ = self.tx.send(RuntimeCommand::Shutdown).await;
        let summary = self.task.await.context("session task panicked")?;
        Ok(summary)
    }
}

/// Start a session in a new tokio task. Must be called from within a runtime.
pub fn spawn_session(config: RuntimeConfig) -> EngineHandle {
    let (tx, rx) = mpsc::channel(config.command_capacity.max(1));
    let log = config.log_path.clone().map(EventLog::spawn);
    let session = Session::new(config.engine.clone());
    let task = tokio::spawn(run(session, config.engine, rx, log));
    EngineHandle { tx, task }
}

fn elapsed_ms(origin: Instant) -> u64 {
    origin.elapsed().as_millis() as u64
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending::<()>().await,
    }
}

async fn run(
    mut session: Session,
    engine: EngineConfig,
    mut rx: mpsc::Receiver<RuntimeCommand>,
    log: Option<EventLog>,
) -> SessionSummary {
    let origin = Instant::now();
    session.start();
    session.take_events();
    println!(
        "[Runtime] Session started (seed {}, tick {}ms)",
        engine.seed, engine.tick_ms
    );
    if let Some(log) = &log {
        log.record(LogRecord::Started {
            ts_ms: 0,
            seed: engine.seed,
            tick_ms: engine.tick_ms,
            active: session.game().active().into(),
            next: session.game().next_piece().into(),
        });
    }

    loop {
        let deadline = session
            .timer()
            .deadline_ms()
            .map(|ms| origin + Duration::from_millis(ms));

        tokio::select! {
            command = rx.recv() => {
                // Fire any gravity that fell due before this command arrived.
                session.advance_to(elapsed_ms(origin));
                match command {
                    Some(RuntimeCommand::Key(action)) => {
                        session.push_action(action);
                        session.advance(0);
                    }
                    Some(RuntimeCommand::Snapshot(reply)) => {
                        let _ = reply.send(session.snapshot());
                    }
                    Some(RuntimeCommand::Shutdown) | None => break,
                }
            }
            _ = wait_for(deadline) => {
                session.advance_to(elapsed_ms(origin));
            }
        }

        drain_events(&mut session, log.as_ref());
    }

    drain_events(&mut session, log.as_ref());
    let summary = SessionSummary {
        locked_count: session.game().locked_count(),
        cleared_count: session.game().cleared_count(),
        elapsed_ms: session.now_ms(),
    };
    println!(
        "[Runtime] Session stopped ({} locked, {} rows cleared)",
        summary.locked_count, summary.cleared_count
    );
    if let Some(log) = log {
        log.record(LogRecord::Stopped {
            ts_ms: summary.elapsed_ms,
            locked_count: summary.locked_count,
            cleared_count: summary.cleared_count,
        });
        log.close().await;
    }
    summary
}

fn drain_events(session: &mut Session, log: Option<&EventLog>) {
    let events = session.take_events();
    if let Some(log) = log {
        for stamped in &events {
            if let Some(record) = LogRecord::from_event(stamped.at_ms, &stamped.event) {
                log.record(record);
            }
        }
    }
}
