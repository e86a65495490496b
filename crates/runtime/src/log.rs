//! JSONL event log
//!
//! Records are serialized with `serde_json` and appended one per line by a dedicated
//! tokio task, so the actor never waits on the file system.

use std::path::PathBuf;

use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use blockfall_core::ActivePiece;
use blockfall_engine::SessionEvent;

/// Placement of a piece as written to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceRecord {
    pub id: u64,
    pub shape: &'static str,
    pub x: i8,
    pub y: i8,
    pub rotation: u32,
}

impl From<ActivePiece> for PieceRecord {
    fn from(piece: ActivePiece) -> Self {
        Self {
            id: piece.id.0,
            shape: piece.kind.as_str(),
            x: piece.x,
            y: piece.y,
            rotation: piece.rotation,
        }
    }
}

/// One line of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    Started {
        ts_ms: u64,
        seed: u32,
        tick_ms: u32,
        active: PieceRecord,
        next: PieceRecord,
    },
    Moved {
        ts_ms: u64,
        action: &'static str,
        piece: PieceRecord,
    },
    Rejected {
        ts_ms: u64,
        action: &'static str,
    },
    Descended {
        ts_ms: u64,
        piece: PieceRecord,
        cleared_rows: Vec<usize>,
    },
    Locked {
        ts_ms: u64,
        piece_id: u64,
        shape: &'static str,
        cleared_rows: Vec<usize>,
        promoted: PieceRecord,
    },
    Stopped {
        ts_ms: u64,
        locked_count: u32,
        cleared_count: u32,
    },
}

impl LogRecord {
    /// Convert a session event. `Started` needs configuration and is built by the
    /// actor; stale timer fires are not logged.
    pub fn from_event(ts_ms: u64, event: &SessionEvent) -> Option<Self> {
        let record = match event {
            SessionEvent::Started { .. } | SessionEvent::StaleTimer { .. } => return None,
            SessionEvent::Moved { action, piece } => LogRecord::Moved {
                ts_ms,
                action: action.as_str(),
                piece: (*piece).into(),
            },
            SessionEvent::Rejected { action } => LogRecord::Rejected {
                ts_ms,
                action: action.as_str(),
            },
            SessionEvent::Descended {
                piece,
                cleared_rows,
            } => LogRecord::Descended {
                ts_ms,
                piece: (*piece).into(),
                cleared_rows: cleared_rows.to_vec(),
            },
            SessionEvent::Locked {
                piece_id,
                kind,
                cleared_rows,
                promoted,
            } => LogRecord::Locked {
                ts_ms,
                piece_id: piece_id.0,
                shape: kind.as_str(),
                cleared_rows: cleared_rows.to_vec(),
                promoted: (*promoted).into(),
            },
        };
        Some(record)
    }
}

/// Handle to the log writer task
#[derive(Debug)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<LogRecord>,
    task: JoinHandle<()>,
}

impl EventLog {
    /// Spawn the writer task for `path`. The file is created if missing and
    /// appended to otherwise.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
        let task = tokio::spawn(async move {
            let mut file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("[Runtime] Event log disabled ({}): {}", path.display(), e);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(512);
            while let Some(record) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &record).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });
        Self { tx, task }
    }

    pub fn record(&self, record: LogRecord) {
        let _ = self.tx.send(record);
    }

    /// Stop accepting records and wait until everything is on disk
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}
