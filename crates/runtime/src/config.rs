use std::path::PathBuf;

use blockfall_engine::EngineConfig;

/// Default capacity of the command channel
pub const DEFAULT_MAX_PENDING: usize = 64;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Commands that may wait in the channel before senders block
    pub command_capacity: usize,
    /// Append-only JSONL event log
    pub log_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            command_capacity: DEFAULT_MAX_PENDING,
            log_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let engine = EngineConfig::from_lookup(&lookup);

        let command_capacity = lookup("BLOCKFALL_MAX_PENDING")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_PENDING);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            engine,
            command_capacity,
            log_path,
        }
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            "BLOCKFALL_SEED" => Some("9".to_string()),
            _ => None,
        });
        assert_eq!(config.command_capacity, DEFAULT_MAX_PENDING);
        assert_eq!(config.log_path, None);
        assert_eq!(config.engine.seed, 9);
        assert_eq!(config.engine.tick_ms, 1200);
    }

    #[test]
    fn reads_pending_and_log_path() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            "BLOCKFALL_MAX_PENDING" => Some(" 8 ".to_string()),
            "BLOCKFALL_LOG_PATH" => Some("/tmp/blockfall.jsonl".to_string()),
            "BLOCKFALL_TICK_MS" => Some("500".to_string()),
            _ => None,
        });
        assert_eq!(config.command_capacity, 8);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/blockfall.jsonl")));
        assert_eq!(config.engine.tick_ms, 500);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            "BLOCKFALL_MAX_PENDING" => Some("0".to_string()),
            "BLOCKFALL_LOG_PATH" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.command_capacity, DEFAULT_MAX_PENDING);
        assert_eq!(config.log_path, None);
    }
}
