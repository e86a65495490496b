//! Engine configuration

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::GRAVITY_TICK_MS;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Interval between gravity steps in milliseconds
    pub tick_ms: u32,
    /// Seed for shape selection
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: GRAVITY_TICK_MS,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_TICK_MS`: gravity interval (default 1200, zero is ignored)
    /// - `BLOCKFALL_SEED`: shape seed (default derived from the system clock)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(GRAVITY_TICK_MS);

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or_else(clock_seed);

        Self { tick_ms, seed }
    }

    pub fn with_tick_ms(mut self, tick_ms: u32) -> Self {
        self.tick_ms = tick_ms.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
