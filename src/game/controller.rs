use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::board::{Card, CardId, ImageRef, build_board};
use super::levels::{LevelPreset, LevelRegistry};
use super::matcher::{FlipMatcher, SelectOutcome};
use super::screen::{Overlay, Screen, ScreenNavigator};
use super::selection::ImageSelection;
use super::timer::{RoundTimer, TimerEvent};
use crate::config::GameConfig;
use crate::error::{GameError, Result};

/// Generation number of a round. Delayed callbacks carry it so they can be
/// dropped once their round is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    RoundStarted {
        round: RoundId,
        level: LevelPreset,
        card_count: usize,
    },
    CardRevealed(CardId),
    MovesChanged(u32),
    PairMatched(CardId, CardId),
    /// The host should call `hide_mismatch(round)` after `delay_ms`.
    MismatchPending {
        round: RoundId,
        delay_ms: u64,
    },
    CardsHidden(Vec<CardId>),
    TimeChanged(u32),
    /// The host should call `finish_win(round)` after `dwell_ms`.
    RoundWon {
        round: RoundId,
        dwell_ms: u64,
    },
    RoundLost {
        round: RoundId,
    },
    ReturnedToMenu,
}

#[derive(Clone, Debug)]
pub struct RoundState {
    id: RoundId,
    level: LevelPreset,
    cards: Vec<Card>,
    matcher: FlipMatcher,
    remaining_secs: Option<u32>,
    outcome: Option<RoundOutcome>,
}

impl RoundState {
    fn new(id: RoundId, level: LevelPreset, cards: Vec<Card>) -> Self {
        let remaining_secs = level.time_limit_secs;
        RoundState {
            id,
            level,
            cards,
            matcher: FlipMatcher::new(),
            remaining_secs,
            outcome: None,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn level(&self) -> &LevelPreset {
        &self.level
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn pending(&self) -> &[CardId] {
        self.matcher.pending()
    }

    pub fn matcher(&self) -> &FlipMatcher {
        &self.matcher
    }

    pub fn move_count(&self) -> u32 {
        self.matcher.move_count()
    }

    pub fn matched_count(&self) -> usize {
        self.matcher.matched_count()
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Owns the whole game lifecycle: level choice, image choice, the live round,
/// its countdown and the active screen.
pub struct RoundController {
    config: GameConfig,
    registry: LevelRegistry,
    navigator: ScreenNavigator,
    selection: ImageSelection,
    selected_level: usize,
    round: Option<RoundState>,
    timer: RoundTimer,
    last_round: u64,
    rng: StdRng,
}

impl RoundController {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        let registry = LevelRegistry::from_config(&config)?;
        let selection = ImageSelection::new(config.preview_limit);
        Ok(RoundController {
            config,
            registry,
            navigator: ScreenNavigator::new(),
            selection,
            selected_level: 0,
            round: None,
            timer: RoundTimer::new(),
            last_round: 0,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn levels(&self) -> &LevelRegistry {
        &self.registry
    }

    pub fn screen(&self) -> Screen {
        self.navigator.active()
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.navigator.overlay()
    }

    pub fn selected_level(&self) -> Result<LevelPreset> {
        self.registry.get_level(self.selected_level)
    }

    pub fn selection(&self) -> &ImageSelection {
        &self.selection
    }

    pub fn images(&self) -> &[ImageRef] {
        self.selection.images()
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn select_level(&mut self, index: usize) -> Result<LevelPreset> {
        let level = self.registry.get_level(index).inspect_err(|err| {
            warn!(index, %err, "rejected level selection");
        })?;
        self.selected_level = index;
        self.timer.cancel();
        if let Some(round) = self.round.take() {
            debug!(round = round.id.0, "round discarded by level change");
        }
        self.navigator.show(Screen::ImagePicker);
        info!(level = %level.name, pairs = level.pair_count, "level selected");
        Ok(level)
    }

    /// Replaces the selection. An empty pick keeps the previous images.
    pub fn set_images(&mut self, images: Vec<ImageRef>) {
        if images.is_empty() {
            warn!("empty image pick ignored");
            return;
        }
        debug!(count = images.len(), "images picked");
        self.selection.set(images);
    }

    pub fn back_from_images(&mut self) -> Vec<RoundEvent> {
        self.selection.clear();
        self.leave_to_menu()
    }

    pub fn start_round(&mut self) -> Result<Vec<RoundEvent>> {
        if self.selection.is_empty() {
            warn!("round start requested without images");
            return Err(GameError::NoImagesSelected);
        }
        let level = self.selected_level()?;
        let images = self.selection.for_round(level.pair_count);
        let cards = build_board(images, level.pair_count, &mut self.rng)?;

        self.timer.cancel();
        self.last_round += 1;
        let id = RoundId(self.last_round);
        let card_count = cards.len();

        let mut events = vec![
            RoundEvent::RoundStarted {
                round: id,
                level: level.clone(),
                card_count,
            },
            RoundEvent::MovesChanged(0),
        ];
        if let Some(limit) = level.time_limit_secs {
            self.timer.start(limit);
            events.push(RoundEvent::TimeChanged(limit));
        }

        info!(round = id.0, level = %level.name, cards = card_count, "round started");
        self.round = Some(RoundState::new(id, level, cards));
        self.navigator.show(Screen::Game);
        Ok(events)
    }

    /// Single dispatch point for card clicks.
    pub fn select_card(&mut self, id: CardId) -> Vec<RoundEvent> {
        let Some(round) = self.round.as_mut() else {
            debug!(card = id.index(), "click without a round");
            return Vec::new();
        };
        if round.is_finished() {
            return Vec::new();
        }

        match round.matcher.select(&mut round.cards, id) {
            SelectOutcome::Ignored(_) => Vec::new(),
            SelectOutcome::Revealed(card) => vec![RoundEvent::CardRevealed(card)],
            SelectOutcome::Mismatched { second, .. } => vec![
                RoundEvent::CardRevealed(second),
                RoundEvent::MovesChanged(round.move_count()),
                RoundEvent::MismatchPending {
                    round: round.id,
                    delay_ms: self.config.mismatch_delay_ms,
                },
            ],
            SelectOutcome::Matched { first, second, won } => {
                let mut events = vec![
                    RoundEvent::CardRevealed(second),
                    RoundEvent::MovesChanged(round.move_count()),
                    RoundEvent::PairMatched(first, second),
                ];
                if won {
                    round.outcome = Some(RoundOutcome::Won);
                    let round_id = round.id;
                    info!(round = round_id.0, moves = round.move_count(), "round won");
                    self.timer.cancel();
                    if !self.navigator.show_overlay(Overlay::Win) {
                        warn!(round = round_id.0, "win overlay shown outside the game view");
                    }
                    events.push(RoundEvent::RoundWon {
                        round: round_id,
                        dwell_ms: self.config.win_dwell_ms,
                    });
                }
                events
            }
        }
    }

    /// Fired after the mismatch delay. Late calls for a finished or replaced
    /// round do nothing, so cards face-up at the end of a round stay face-up.
    pub fn hide_mismatch(&mut self, round_id: RoundId) -> Vec<RoundEvent> {
        let Some(round) = self.live_round_mut(round_id) else {
            debug!(round = round_id.0, "stale mismatch callback dropped");
            return Vec::new();
        };
        let hidden = round.matcher.hide_pending(&mut round.cards);
        if hidden.is_empty() {
            Vec::new()
        } else {
            vec![RoundEvent::CardsHidden(hidden)]
        }
    }

    /// Fired once per tick interval while a timed round runs.
    pub fn tick(&mut self, round_id: RoundId) -> Vec<RoundEvent> {
        let Some(round) = self
            .round
            .as_mut()
            .filter(|round| round.id == round_id && !round.is_finished())
        else {
            debug!(round = round_id.0, "stale tick dropped");
            return Vec::new();
        };
        let Some(event) = self.timer.tick() else {
            return Vec::new();
        };
        match event {
            TimerEvent::Tick(remaining) => {
                round.remaining_secs = Some(remaining);
                vec![RoundEvent::TimeChanged(remaining)]
            }
            TimerEvent::Expired => {
                round.remaining_secs = Some(0);
                round.outcome = Some(RoundOutcome::Lost);
                info!(round = round_id.0, moves = round.move_count(), "round lost");
                if !self.navigator.show_overlay(Overlay::Lose) {
                    warn!(round = round_id.0, "loss overlay shown outside the game view");
                }
                vec![
                    RoundEvent::TimeChanged(0),
                    RoundEvent::RoundLost { round: round_id },
                ]
            }
        }
    }

    /// Fired after the win dwell time; leaves the win overlay for the menu.
    pub fn finish_win(&mut self, round_id: RoundId) -> Vec<RoundEvent> {
        let won = self
            .round
            .as_ref()
            .is_some_and(|r| r.id == round_id && r.outcome == Some(RoundOutcome::Won));
        if !won {
            debug!(round = round_id.0, "stale win callback dropped");
            return Vec::new();
        }
        self.leave_to_menu()
    }

    /// Leaves the game view mid-round.
    pub fn go_back(&mut self) -> Vec<RoundEvent> {
        self.leave_to_menu()
    }

    /// Dismisses the loss overlay and returns to the menu.
    pub fn back_to_menu(&mut self) -> Vec<RoundEvent> {
        self.navigator.dismiss_overlay();
        self.leave_to_menu()
    }

    /// Dismisses the loss overlay and replays the level with the same images.
    pub fn retry(&mut self) -> Result<Vec<RoundEvent>> {
        if self.round.is_none() {
            return Err(GameError::NoActiveRound);
        }
        self.navigator.dismiss_overlay();
        self.start_round()
    }

    pub fn reset(&mut self) {
        self.timer.cancel();
        self.round = None;
        self.selection.clear();
        self.selected_level = 0;
        self.navigator = ScreenNavigator::new();
    }

    fn live_round_mut(&mut self, round_id: RoundId) -> Option<&mut RoundState> {
        self.round
            .as_mut()
            .filter(|round| round.id == round_id && !round.is_finished())
    }

    fn leave_to_menu(&mut self) -> Vec<RoundEvent> {
        self.timer.cancel();
        if let Some(round) = self.round.take() {
            debug!(round = round.id.0, "round discarded");
        }
        self.navigator.show(Screen::Menu);
        vec![RoundEvent::ReturnedToMenu]
    }
}
