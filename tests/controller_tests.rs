//! Round lifecycle scenarios driven through the controller.

use pairs::game::{
    CardId, ImageRef, LevelPreset, Overlay, RoundController, RoundEvent, RoundId, Screen,
};
use pairs::{GameConfig, GameError};

const UNTIMED: usize = 0;
const TIMED: usize = 1;

fn config() -> GameConfig {
    GameConfig {
        levels: vec![
            LevelPreset::new("Tiny", 2, None),
            LevelPreset::new("Rush", 2, Some(5)),
        ],
        ..GameConfig::default()
    }
}

fn images(names: &[&str]) -> Vec<ImageRef> {
    names.iter().map(|n| ImageRef::from(*n)).collect()
}

fn ready(level: usize) -> RoundController {
    let mut ctl = RoundController::with_seed(config(), 5).unwrap();
    ctl.select_level(level).unwrap();
    ctl.set_images(images(&["cat.png", "dog.png", "owl.png"]));
    ctl.start_round().unwrap();
    ctl
}

fn round_id(ctl: &RoundController) -> RoundId {
    ctl.round().unwrap().id()
}

/// Pairs of card ids sharing an identity, in board order.
fn pairs_of(ctl: &RoundController) -> Vec<(CardId, CardId)> {
    let cards = ctl.round().unwrap().cards();
    let mut out = Vec::new();
    for (i, a) in cards.iter().enumerate() {
        for b in &cards[i + 1..] {
            if a.identity == b.identity {
                out.push((a.id, b.id));
            }
        }
    }
    out
}

fn mismatch_of(ctl: &RoundController) -> (CardId, CardId) {
    let cards = ctl.round().unwrap().cards();
    let first = &cards[0];
    let other = cards
        .iter()
        .find(|c| c.identity != first.identity)
        .unwrap();
    (first.id, other.id)
}

#[test]
fn level_selection_moves_to_picker() {
    let mut ctl = RoundController::with_seed(config(), 1).unwrap();
    let level = ctl.select_level(TIMED).unwrap();
    assert_eq!(level.name, "Rush");
    assert_eq!(ctl.screen(), Screen::ImagePicker);
}

#[test]
fn bad_level_index_is_an_error() {
    let mut ctl = RoundController::with_seed(config(), 1).unwrap();
    assert!(matches!(
        ctl.select_level(7),
        Err(GameError::LevelOutOfRange { index: 7, count: 2 })
    ));
    assert_eq!(ctl.screen(), Screen::Menu);
}

#[test]
fn start_without_images_is_refused() {
    let mut ctl = RoundController::with_seed(config(), 1).unwrap();
    ctl.select_level(UNTIMED).unwrap();
    assert!(matches!(ctl.start_round(), Err(GameError::NoImagesSelected)));
    assert_eq!(ctl.screen(), Screen::ImagePicker);
    assert!(ctl.round().is_none());
}

#[test]
fn start_builds_board_from_leading_images() {
    let ctl = ready(UNTIMED);
    let round = ctl.round().unwrap();
    assert_eq!(ctl.screen(), Screen::Game);
    assert_eq!(round.cards().len(), 4);
    assert!(round.cards().iter().all(|c| c.identity.as_str() != "owl.png"));
    assert_eq!(round.move_count(), 0);
    assert_eq!(round.remaining_secs(), None);
    assert!(!ctl.timer().is_running());
}

#[test]
fn match_does_not_schedule_a_hide() {
    let mut ctl = ready(UNTIMED);
    let (a, b) = pairs_of(&ctl)[0];

    assert_eq!(ctl.select_card(a), vec![RoundEvent::CardRevealed(a)]);
    let events = ctl.select_card(b);

    assert!(events.contains(&RoundEvent::PairMatched(a, b)));
    assert!(events.contains(&RoundEvent::MovesChanged(1)));
    assert!(!events.iter().any(|e| matches!(e, RoundEvent::MismatchPending { .. })));
    assert_eq!(ctl.round().unwrap().matched_count(), 2);
}

#[test]
fn mismatch_hides_after_delay_callback() {
    let mut ctl = ready(UNTIMED);
    let id = round_id(&ctl);
    let (a, b) = mismatch_of(&ctl);

    ctl.select_card(a);
    let events = ctl.select_card(b);
    assert!(events.contains(&RoundEvent::MismatchPending {
        round: id,
        delay_ms: 800
    }));

    // Clicks during the reveal window are dropped.
    let (c, _) = pairs_of(&ctl)[1];
    assert!(ctl.select_card(c).is_empty());

    assert_eq!(ctl.hide_mismatch(id), vec![RoundEvent::CardsHidden(vec![a, b])]);
    let round = ctl.round().unwrap();
    assert!(round.cards().iter().all(|card| !card.is_revealed()));
    assert!(round.pending().is_empty());
    assert_eq!(round.matched_count(), 0);
    assert_eq!(round.move_count(), 1);
}

#[test]
fn win_fires_once_and_returns_to_menu() {
    let mut ctl = ready(UNTIMED);
    let id = round_id(&ctl);
    let mut wins = 0;

    for (a, b) in pairs_of(&ctl) {
        ctl.select_card(a);
        for event in ctl.select_card(b) {
            if let RoundEvent::RoundWon { round, dwell_ms } = event {
                assert_eq!(round, id);
                assert_eq!(dwell_ms, 2500);
                assert_eq!(ctl.round().unwrap().matched_count(), 4);
                wins += 1;
            }
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(ctl.overlay(), Some(Overlay::Win));
    assert_eq!(ctl.screen(), Screen::Game);

    assert_eq!(ctl.finish_win(id), vec![RoundEvent::ReturnedToMenu]);
    assert_eq!(ctl.screen(), Screen::Menu);
    assert_eq!(ctl.overlay(), None);
    assert!(ctl.round().is_none());
    assert!(ctl.finish_win(id).is_empty());
}

#[test]
fn timer_expires_on_fifth_tick() {
    let mut ctl = ready(TIMED);
    let id = round_id(&ctl);
    assert_eq!(ctl.round().unwrap().remaining_secs(), Some(5));

    for expected in (1..5).rev() {
        assert_eq!(ctl.tick(id), vec![RoundEvent::TimeChanged(expected)]);
        assert_eq!(ctl.overlay(), None);
    }
    assert_eq!(
        ctl.tick(id),
        vec![RoundEvent::TimeChanged(0), RoundEvent::RoundLost { round: id }]
    );
    assert_eq!(ctl.overlay(), Some(Overlay::Lose));
    assert!(ctl.tick(id).is_empty());
}

#[test]
fn loss_cancels_pending_hide() {
    let mut ctl = ready(TIMED);
    let id = round_id(&ctl);
    let (a, b) = mismatch_of(&ctl);
    ctl.select_card(a);
    ctl.select_card(b);

    for _ in 0..5 {
        ctl.tick(id);
    }
    assert_eq!(ctl.overlay(), Some(Overlay::Lose));

    assert!(ctl.hide_mismatch(id).is_empty());
    let round = ctl.round().unwrap();
    assert!(round.card(a).unwrap().is_revealed());
    assert!(round.card(b).unwrap().is_revealed());
    assert!(ctl.select_card(pairs_of(&ctl)[0].0).is_empty());
}

#[test]
fn going_back_invalidates_callbacks() {
    let mut ctl = ready(TIMED);
    let id = round_id(&ctl);
    let (a, b) = mismatch_of(&ctl);
    ctl.select_card(a);
    ctl.select_card(b);

    assert_eq!(ctl.go_back(), vec![RoundEvent::ReturnedToMenu]);
    assert_eq!(ctl.screen(), Screen::Menu);
    assert!(!ctl.timer().is_running());
    assert!(ctl.hide_mismatch(id).is_empty());
    assert!(ctl.tick(id).is_empty());
}

#[test]
fn stale_callbacks_do_not_touch_new_round() {
    let mut ctl = ready(TIMED);
    let old = round_id(&ctl);
    let (a, b) = mismatch_of(&ctl);
    ctl.select_card(a);
    ctl.select_card(b);

    ctl.start_round().unwrap();
    let new = round_id(&ctl);
    assert_ne!(old, new);

    let (c, _) = pairs_of(&ctl)[0];
    ctl.select_card(c);
    assert!(ctl.hide_mismatch(old).is_empty());
    assert!(ctl.tick(old).is_empty());
    assert_eq!(ctl.round().unwrap().pending(), &[c]);
    assert_eq!(ctl.round().unwrap().remaining_secs(), Some(5));
}

#[test]
fn retry_replays_with_same_images() {
    let mut ctl = ready(TIMED);
    let id = round_id(&ctl);
    for _ in 0..5 {
        ctl.tick(id);
    }

    let events = ctl.retry().unwrap();
    assert!(matches!(events[0], RoundEvent::RoundStarted { card_count: 4, .. }));
    assert!(events.contains(&RoundEvent::TimeChanged(5)));
    assert_eq!(ctl.overlay(), None);
    assert_eq!(ctl.screen(), Screen::Game);
    assert!(ctl.timer().is_running());
}

#[test]
fn back_to_menu_from_loss() {
    let mut ctl = ready(TIMED);
    let id = round_id(&ctl);
    for _ in 0..5 {
        ctl.tick(id);
    }
    ctl.back_to_menu();
    assert_eq!(ctl.screen(), Screen::Menu);
    assert_eq!(ctl.overlay(), None);
    assert!(ctl.round().is_none());
}

#[test]
fn back_from_picker_clears_images() {
    let mut ctl = RoundController::with_seed(config(), 1).unwrap();
    ctl.select_level(UNTIMED).unwrap();
    ctl.set_images(images(&["a.png"]));
    ctl.back_from_images();
    assert_eq!(ctl.screen(), Screen::Menu);
    assert!(ctl.images().is_empty());
}

#[test]
fn single_image_yields_one_pair() {
    let mut ctl = RoundController::with_seed(config(), 1).unwrap();
    ctl.select_level(UNTIMED).unwrap();
    ctl.set_images(images(&["solo.png"]));
    ctl.start_round().unwrap();
    let id = round_id(&ctl);

    ctl.select_card(CardId(0));
    let events = ctl.select_card(CardId(1));
    assert!(events.contains(&RoundEvent::RoundWon {
        round: id,
        dwell_ms: 2500
    }));
}

#[test]
fn choosing_a_level_mid_round_discards_it() {
    let mut ctl = ready(TIMED);
    let id = round_id(&ctl);
    let (a, b) = mismatch_of(&ctl);
    ctl.select_card(a);
    ctl.select_card(b);

    ctl.select_level(UNTIMED).unwrap();
    assert_eq!(ctl.screen(), Screen::ImagePicker);
    assert!(ctl.round().is_none());
    assert!(!ctl.timer().is_running());

    for _ in 0..5 {
        assert!(ctl.tick(id).is_empty());
    }
    assert!(ctl.hide_mismatch(id).is_empty());
    assert_eq!(ctl.overlay(), None);
}

#[test]
fn empty_pick_keeps_previous_images() {
    let mut ctl = RoundController::with_seed(config(), 1).unwrap();
    ctl.select_level(UNTIMED).unwrap();
    ctl.set_images(images(&["a.png", "b.png"]));
    ctl.set_images(Vec::new());
    assert_eq!(ctl.images(), &images(&["a.png", "b.png"])[..]);
}
