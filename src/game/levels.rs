use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPreset {
    pub name: String,
    pub pair_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<u32>,
}

impl LevelPreset {
    pub fn new(name: impl Into<String>, pair_count: usize, time_limit_secs: Option<u32>) -> Self {
        LevelPreset {
            name: name.into(),
            pair_count,
            time_limit_secs,
        }
    }

    pub fn defaults() -> Vec<LevelPreset> {
        vec![
            LevelPreset::new("Easy", 10, None),
            LevelPreset::new("Normal", 6, Some(60)),
            LevelPreset::new("Hard", 8, Some(45)),
            LevelPreset::new("Expert", 10, Some(30)),
        ]
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit_secs.is_some()
    }
}

/// Fixed, ordered list of presets selected by index.
#[derive(Clone, Debug)]
pub struct LevelRegistry {
    levels: Vec<LevelPreset>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        LevelRegistry {
            levels: LevelPreset::defaults(),
        }
    }
}

impl LevelRegistry {
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(LevelRegistry {
            levels: config.levels.clone(),
        })
    }

    pub fn get_level(&self, index: usize) -> Result<LevelPreset> {
        self.levels
            .get(index)
            .cloned()
            .ok_or(GameError::LevelOutOfRange {
                index,
                count: self.levels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelPreset> {
        self.levels.iter()
    }
}
