use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::game::levels::LevelPreset;

pub const MISMATCH_DELAY_MS: u64 = 800;
pub const WIN_DWELL_MS: u64 = 2500;
pub const SCREEN_ACTIVATION_DELAY_MS: u64 = 50;
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const PREVIEW_LIMIT: usize = 10;

/// Tunables for a game session. Every field falls back to its default when
/// missing from a JSON override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub levels: Vec<LevelPreset>,
    pub mismatch_delay_ms: u64,
    pub win_dwell_ms: u64,
    pub screen_activation_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub preview_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            levels: LevelPreset::defaults(),
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            win_dwell_ms: WIN_DWELL_MS,
            screen_activation_delay_ms: SCREEN_ACTIVATION_DELAY_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            preview_limit: PREVIEW_LIMIT,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(GameError::InvalidConfig("at least one level is required".into()));
        }
        for level in &self.levels {
            if level.pair_count == 0 {
                return Err(GameError::InvalidConfig(format!(
                    "level {:?} must have at least one pair",
                    level.name
                )));
            }
            if level.time_limit_secs == Some(0) {
                return Err(GameError::InvalidConfig(format!(
                    "level {:?} has a zero time limit",
                    level.name
                )));
            }
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig("tick_interval_ms must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.levels.len(), 4);
        assert_eq!(config.mismatch_delay_ms, 800);
        assert_eq!(config.win_dwell_ms, 2500);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "mismatch_delay_ms": 300 }"#).unwrap();
        assert_eq!(config.mismatch_delay_ms, 300);
        assert_eq!(config.levels, LevelPreset::defaults());
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn custom_levels_parse() {
        let raw = r#"{
            "levels": [
                { "name": "Tiny", "pair_count": 2 },
                { "name": "Rush", "pair_count": 3, "time_limit_secs": 10 }
            ]
        }"#;
        let config = GameConfig::from_json(raw).unwrap();
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.levels[0].time_limit_secs, None);
        assert_eq!(config.levels[1].time_limit_secs, Some(10));
    }

    #[test]
    fn rejects_zero_pairs() {
        let raw = r#"{ "levels": [ { "name": "Broken", "pair_count": 0 } ] }"#;
        assert!(matches!(
            GameConfig::from_json(raw),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_zero_time_limit() {
        let raw = r#"{ "levels": [ { "name": "Broken", "pair_count": 2, "time_limit_secs": 0 } ] }"#;
        assert!(GameConfig::from_json(raw).is_err());
    }

    #[test]
    fn rejects_empty_levels_and_bad_json() {
        assert!(GameConfig::from_json(r#"{ "levels": [] }"#).is_err());
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(GameError::Json(_))
        ));
    }

    #[test]
    fn json_survives_a_write_and_read() {
        let config = GameConfig::default();
        let raw = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&raw).unwrap(), config);
    }
}
