pub mod board;
pub mod controller;
pub mod levels;
pub mod matcher;
pub mod screen;
pub mod selection;
pub mod timer;

pub use board::{Card, CardId, CardStatus, ImageRef, build_board};
pub use controller::{RoundController, RoundEvent, RoundId, RoundOutcome, RoundState};
pub use levels::{LevelPreset, LevelRegistry};
pub use matcher::{FlipMatcher, IgnoreReason, MatcherPhase, SelectOutcome};
pub use screen::{Overlay, Screen, ScreenNavigator};
pub use selection::ImageSelection;
pub use timer::{RoundTimer, TimerEvent};
