//! Session - the event loop that owns one game.
//!
//! All mutation of the game happens inside [`Session::process`], one event at a
//! time. Two kinds of stimulus exist: player actions and gravity timer fires.
//!
//! Timer policy:
//! - `start()` arms the gravity timer.
//! - every committed transition (a successful move, a descent, a lock) re-arms it,
//!   which makes any fire scheduled against the previous piece state stale;
//! - a rejected move leaves the timer untouched.
//!
//! A tick period of zero is clamped to 1 ms so that `advance_to` always makes progress.

use std::collections::VecDeque;

use crate::config::EngineConfig;
use crate::core::{
    ActivePiece, ClearedRows, GameSnapshot, GameState, MoveOutcome, ShapeSource, SimpleRng,
    TickOutcome,
};
use crate::timer::{GravityTimer, TimerToken};
use crate::types::{GameAction, PieceId, ShapeKind};

/// Maximum number of observer events retained between drains
const MAX_PENDING_EVENTS: usize = 256;

/// Stimulus delivered to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Key(GameAction),
    TimerFired(TimerToken),
}

/// What happened, for observers (logging, tests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        active: ActivePiece,
        next: ActivePiece,
    },
    Moved {
        action: GameAction,
        piece: ActivePiece,
    },
    Rejected {
        action: GameAction,
    },
    Descended {
        piece: ActivePiece,
        cleared_rows: ClearedRows,
    },
    Locked {
        piece_id: PieceId,
        kind: ShapeKind,
        cleared_rows: ClearedRows,
        promoted: ActivePiece,
    },
    StaleTimer {
        token: TimerToken,
    },
}

/// A [`SessionEvent`] together with the virtual time it was emitted at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedEvent {
    pub at_ms: u64,
    pub event: SessionEvent,
}

#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    game: GameState<R>,
    config: EngineConfig,
    timer: GravityTimer,
    queue: VecDeque<EngineEvent>,
    now_ms: u64,
    events: VecDeque<StampedEvent>,
}

impl Session<SimpleRng> {
    pub fn new(config: EngineConfig) -> Self {
        let game = GameState::new(config.seed);
        Self::with_game(game, config)
    }
}

impl<R: ShapeSource> Session<R> {
    pub fn with_game(game: GameState<R>, mut config: EngineConfig) -> Self {
        config.tick_ms = config.tick_ms.max(1);
        Self {
            game,
            config,
            timer: GravityTimer::new(),
            queue: VecDeque::new(),
            now_ms: 0,
            events: VecDeque::new(),
        }
    }

    /// Start the game and arm gravity
    pub fn start(&mut self) {
        if self.game.started() {
            return;
        }
        self.game.start();
        self.rearm();
        self.record(SessionEvent::Started {
            active: self.game.active(),
            next: self.game.next_piece(),
        });
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of events waiting to be processed
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Queue an event for the next [`Session::advance`]
    pub fn push(&mut self, event: EngineEvent) {
        self.queue.push_back(event);
    }

    pub fn push_action(&mut self, action: GameAction) {
        self.push(EngineEvent::Key(action));
    }

    /// Move the clock forward by `elapsed_ms`.
    ///
    /// Queued events are processed first, at the current time. Then every timer
    /// deadline up to the new time fires in order, each at its own deadline.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let target = self.now_ms.saturating_add(elapsed_ms as u64);
        self.advance_to(target);
    }

    /// Move the clock forward to the absolute time `target_ms` (never backwards).
    pub fn advance_to(&mut self, target_ms: u64) {
        self.drain();
        while let Some(deadline) = self.timer.deadline_ms() {
            if deadline > target_ms {
                break;
            }
            self.now_ms = self.now_ms.max(deadline);
            if let Some(token) = self.timer.due(self.now_ms) {
                self.queue.push_back(EngineEvent::TimerFired(token));
            }
            self.drain();
        }
        self.now_ms = self.now_ms.max(target_ms);
    }

    fn drain(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            self.process(event);
        }
    }

    /// Process a single event immediately: read, validate, commit or reject.
    pub fn process(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Key(action) => match self.game.apply_action(action) {
                MoveOutcome::Moved => {
                    self.rearm();
                    self.record(SessionEvent::Moved {
                        action,
                        piece: self.game.active(),
                    });
                }
                MoveOutcome::Rejected => self.record(SessionEvent::Rejected { action }),
            },
            EngineEvent::TimerFired(token) => {
                if !self.timer.is_current(token) {
                    self.record(SessionEvent::StaleTimer { token });
                    return;
                }
                match self.game.gravity_step() {
                    TickOutcome::Idle => {}
                    TickOutcome::Descended { cleared_rows } => {
                        self.rearm();
                        self.record(SessionEvent::Descended {
                            piece: self.game.active(),
                            cleared_rows,
                        });
                    }
                    TickOutcome::Locked { cleared_rows } => {
                        self.rearm();
                        let locked = self.game.take_last_event();
                        let (piece_id, kind) = locked
                            .map(|ev| (ev.piece_id, ev.kind))
                            .unwrap_or((PieceId::NONE, self.game.active().kind));
                        self.record(SessionEvent::Locked {
                            piece_id,
                            kind,
                            cleared_rows,
                            promoted: self.game.active(),
                        });
                    }
                }
            }
        }
    }

    fn rearm(&mut self) {
        self.timer.arm(self.now_ms, self.config.tick_ms.max(1));
    }

    fn record(&mut self, event: SessionEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(StampedEvent {
            at_ms: self.now_ms,
            event,
        });
    }

    /// Drain observer events, oldest first, each stamped with its emission time
    pub fn take_events(&mut self) -> Vec<StampedEvent> {
        self.events.drain(..).collect()
    }
}
