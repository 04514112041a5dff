use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    ImagePicker,
    Game,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::ImagePicker => "images",
            Screen::Game => "game",
        }
    }
}

/// Result panels drawn on top of the game board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Win,
    Lose,
}

/// Tracks the single active view plus an optional overlay. Overlays only
/// exist while the game view is active.
#[derive(Clone, Debug, Default)]
pub struct ScreenNavigator {
    active: Screen,
    overlay: Option<Overlay>,
}

impl ScreenNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn show(&mut self, screen: Screen) {
        debug!(from = self.active.name(), to = screen.name(), "navigate");
        self.overlay = None;
        self.active = screen;
    }

    /// Returns false when the game view is not active.
    pub fn show_overlay(&mut self, overlay: Overlay) -> bool {
        if self.active != Screen::Game {
            return false;
        }
        self.overlay = Some(overlay);
        true
    }

    pub fn dismiss_overlay(&mut self) -> Option<Overlay> {
        self.overlay.take()
    }
}
