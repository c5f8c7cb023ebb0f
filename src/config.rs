use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::EngineError;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 6;
const DEFAULT_LEVEL: u8 = 3;
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Strength settings for the bundled engine.
///
/// `level` is the iterative-deepening depth limit. Levels 3 and up also
/// solve the endgame exactly once few enough squares are left. `timeout_ms`
/// bounds a single move computation; depth 1 always completes regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub level: u8,
    pub timeout_ms: u64,
}

impl EngineConfig {
    pub fn new(level: u8, timeout_ms: u64) -> Result<Self, EngineError> {
        let config = Self { level, timeout_ms };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(EngineError::InvalidLevel { level: self.level });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn level_outside_range_is_rejected() {
        assert_eq!(
            EngineConfig::new(0, 100),
            Err(EngineError::InvalidLevel { level: 0 })
        );
        assert_eq!(
            EngineConfig::new(7, 100),
            Err(EngineError::InvalidLevel { level: 7 })
        );
        assert!(EngineConfig::new(6, 100).is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"level":5}"#).unwrap();
        assert_eq!(config.level, 5);
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }
}
