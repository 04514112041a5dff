use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use pairs::game::{Card, CardId};

use super::app::handle_card_click;
use super::state::AppState;

pub const CONTENT_MARGIN: i32 = 12;
pub const CARD_GAP: i32 = 8;

const FACE_BACK: &str = "back";
const FACE_FRONT: &str = "front";

/// Columns for a board of `count` cards, as close to square as possible.
pub fn grid_columns(count: usize) -> i32 {
    let mut cols = 1usize;
    while cols * cols < count {
        cols += 1;
    }
    cols as i32
}

fn build_card_face(card: &Card) -> gtk::Stack {
    let faces = gtk::Stack::new();
    faces.set_transition_type(gtk::StackTransitionType::RotateLeftRight);
    faces.set_transition_duration(220);
    faces.set_hexpand(true);
    faces.set_vexpand(true);

    let back = gtk::Label::new(Some("?"));
    back.add_css_class("pairs-card-back");
    faces.add_named(&back, Some(FACE_BACK));

    let front = gtk::Picture::for_filename(card.identity.as_str());
    front.set_content_fit(gtk::ContentFit::Cover);
    front.set_can_shrink(true);
    front.add_css_class("pairs-card-front");
    faces.add_named(&front, Some(FACE_FRONT));

    faces.set_visible_child_name(if card.is_revealed() { FACE_FRONT } else { FACE_BACK });
    faces
}

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("pairs-board");
    grid.set_row_spacing(CARD_GAP as u32);
    grid.set_column_spacing(CARD_GAP as u32);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let cards: Vec<Card> = state
        .borrow()
        .controller
        .round()
        .map(|round| round.cards().to_vec())
        .unwrap_or_default();
    let cols = grid_columns(cards.len());

    let mut buttons = Vec::with_capacity(cards.len());
    let mut faces = Vec::with_capacity(cards.len());

    for (i, card) in cards.iter().enumerate() {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["pairs-card"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let face = build_card_face(card);
        button.set_child(Some(&face));

        let id = card.id;
        let state_click = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_click, id);
        });

        aspect_frame.set_child(Some(&button));
        let index = i as i32;
        grid.attach(&aspect_frame, index % cols, index / cols, 1, 1);
        buttons.push(button);
        faces.push(face);
    }

    let mut st = state.borrow_mut();
    st.card_buttons = buttons;
    st.card_faces = faces;

    grid
}

pub fn show_front(st: &AppState, id: CardId) {
    if let Some(face) = st.card_faces.get(id.index()) {
        face.set_visible_child_name(FACE_FRONT);
    }
    if let Some(button) = st.card_buttons.get(id.index()) {
        button.add_css_class("active");
    }
}

pub fn show_back(st: &AppState, id: CardId) {
    if let Some(face) = st.card_faces.get(id.index()) {
        face.set_visible_child_name(FACE_BACK);
    }
    if let Some(button) = st.card_buttons.get(id.index()) {
        button.remove_css_class("active");
    }
}

pub fn mark_matched(st: &AppState, id: CardId) {
    if let Some(button) = st.card_buttons.get(id.index()) {
        button.remove_css_class("active");
        button.add_css_class("matched");
    }
}
