//! Headless core of the Pairs memory game: level presets, board building,
//! the flip/match rules, the countdown and screen navigation, all owned by a
//! single [`game::RoundController`].

pub mod config;
pub mod error;
pub mod game;

pub use config::GameConfig;
pub use error::{GameError, Result};
