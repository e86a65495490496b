//! Cancellable one-shot gravity timer on a virtual millisecond clock.

/// Identifies one arming of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct GravityTimer {
    generation: u64,
    deadline_ms: Option<u64>,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fire at `now_ms + interval_ms`, replacing any pending one.
    pub fn arm(&mut self, now_ms: u64, interval_ms: u32) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.deadline_ms = Some(now_ms.saturating_add(interval_ms as u64));
        TimerToken(self.generation)
    }

    /// Drop the pending fire. Tokens issued before this are stale.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline_ms = None;
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Whether `token` belongs to the latest arming (fired or pending).
    ///
    /// Any later arm or cancel makes it stale.
    pub fn is_current(&self, token: TimerToken) -> bool {
        token.0 == self.generation
    }

    /// Fire if the deadline has passed. A fired timer is disarmed.
    pub fn due(&mut self, now_ms: u64) -> Option<TimerToken> {
        match self.deadline_ms {
            Some(deadline) if deadline <= now_ms => {
                self.deadline_ms = None;
                Some(TimerToken(self.generation))
            }
            _ => None,
        }
    }
}
