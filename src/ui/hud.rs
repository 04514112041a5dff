use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;

use pairs::game::{LevelPreset, RoundEvent, RoundId};

use super::app::apply_events;
use super::state::AppState;

pub(super) fn set_level(st: &AppState, level: &LevelPreset) {
    if let Some(label) = &st.level_label {
        label.set_text(&level.name);
    }
    if let Some(subtitle) = &st.title_game_subtitle {
        subtitle.set_text(&level.name);
    }
    if let Some(time_box) = &st.time_box {
        time_box.set_visible(level.is_timed());
    }
}

pub(super) fn set_moves(st: &AppState, moves: u32) {
    if let Some(label) = &st.moves_label {
        label.set_text(&moves.to_string());
    }
}

pub(super) fn set_time(st: &AppState, remaining: u32) {
    if let Some(label) = &st.time_label {
        label.set_text(&remaining.to_string());
        if remaining <= 10 {
            label.add_css_class("time-low");
        } else {
            label.remove_css_class("time-low");
        }
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

/// Drives the controller countdown for `round` until it expires or goes stale.
pub(super) fn start_timer(state: &Rc<RefCell<AppState>>, round: RoundId) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);
    let interval = Duration::from_millis(st.controller.config().tick_interval_ms);

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(interval, move || {
        let events = state_clone.borrow_mut().controller.tick(round);
        let finished = events.is_empty()
            || events
                .iter()
                .any(|event| matches!(event, RoundEvent::RoundLost { .. }));
        if finished {
            // The source ends by returning Break; it must not be removed again.
            state_clone.borrow_mut().timer_handle = None;
        }
        apply_events(&state_clone, events);
        if finished {
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });
    st.timer_handle = Some(handle);
}
