//! Errors raised by the round controller and its configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("select at least 1 image")]
    NoImagesSelected,

    #[error("level index {index} out of range ({count} levels)")]
    LevelOutOfRange { index: usize, count: usize },

    #[error("no round in progress")]
    NoActiveRound,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
