use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use pairs::game::{Overlay, Screen};

use super::board::build_board_grid;
use super::state::AppState;

pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let board_container = state.borrow().board_container.clone();
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    board_container.append(&grid);
}

/// Presents the controller's active screen.
pub(super) fn sync_screen(st: &AppState) {
    let screen = st.controller.screen();
    if let Some(back) = &st.back_button {
        back.set_visible(screen != Screen::Menu);
    }
    if let Some(stack) = &st.view_stack {
        let transition = if screen == Screen::Menu {
            gtk::StackTransitionType::SlideRight
        } else {
            gtk::StackTransitionType::SlideLeft
        };
        stack.set_transition_type(transition);
        stack.set_visible_child_name(screen.name());
    }
    sync_overlay(st);
}

pub(super) fn sync_overlay(st: &AppState) {
    let overlay = st.controller.overlay();
    if let Some(panel) = &st.win_panel {
        panel.set_visible(overlay == Some(Overlay::Win));
    }
    if let Some(panel) = &st.lose_panel {
        panel.set_visible(overlay == Some(Overlay::Lose));
    }
    if let Some(container) = &st.board_container {
        container.set_sensitive(overlay.is_none());
    }
}

fn overlay_panel(css_class: &str) -> (gtk::Box, gtk::Box) {
    let panel = gtk::Box::new(gtk::Orientation::Vertical, 0);
    panel.set_halign(gtk::Align::Fill);
    panel.set_valign(gtk::Align::Fill);
    panel.add_css_class("result-overlay");
    panel.set_visible(false);

    let card = gtk::Box::new(gtk::Orientation::Vertical, 14);
    card.set_halign(gtk::Align::Center);
    card.set_valign(gtk::Align::Center);
    card.set_vexpand(true);
    card.add_css_class("result-card");
    card.add_css_class(css_class);
    panel.append(&card);
    (panel, card)
}

pub(super) fn build_win_panel() -> gtk::Box {
    let (panel, card) = overlay_panel("result-win");
    let title = gtk::Label::new(Some("You found every pair!"));
    title.add_css_class("title-1");
    let message = gtk::Label::new(Some("Back to the menu in a moment…"));
    message.add_css_class("body");
    card.append(&title);
    card.append(&message);
    panel
}

pub(super) fn build_lose_panel(
    on_retry: impl Fn() + 'static,
    on_menu: impl Fn() + 'static,
) -> gtk::Box {
    let (panel, card) = overlay_panel("result-lose");
    let title = gtk::Label::new(Some("Time's up!"));
    title.add_css_class("title-1");

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    buttons.set_halign(gtk::Align::Center);
    let retry = gtk::Button::with_label("Try Again");
    retry.add_css_class("suggested-action");
    retry.connect_clicked(move |_| on_retry());
    let menu = gtk::Button::with_label("Main Menu");
    menu.connect_clicked(move |_| on_menu());
    buttons.append(&retry);
    buttons.append(&menu);

    card.append(&title);
    card.append(&buttons);
    panel
}
