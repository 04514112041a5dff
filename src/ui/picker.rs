use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::gio;
use gtk4::prelude::*;
use tracing::warn;

use pairs::game::ImageRef;

use super::app::{begin_round, leave_image_picker};
use super::board::CONTENT_MARGIN;
use super::state::AppState;

const PREVIEW_SIZE: i32 = 72;

fn image_dialog() -> gtk::FileDialog {
    let filter = gtk::FileFilter::new();
    filter.set_name(Some("Images"));
    filter.add_mime_type("image/*");

    let filters = gio::ListStore::new::<gtk::FileFilter>();
    filters.append(&filter);

    gtk::FileDialog::builder()
        .title("Choose images")
        .modal(true)
        .filters(&filters)
        .default_filter(&filter)
        .build()
}

fn open_images(state: &Rc<RefCell<AppState>>) {
    let window = state.borrow().window.clone();
    let state = state.clone();
    image_dialog().open_multiple(window.as_ref(), gio::Cancellable::NONE, move |result| {
        let files = match result {
            Ok(files) => files,
            Err(err) => {
                if !err.matches(gtk::DialogError::Dismissed) {
                    warn!(%err, "image picker failed");
                }
                return;
            }
        };
        let picked = (0..files.n_items())
            .filter_map(|i| files.item(i).and_downcast::<gio::File>())
            .map(|file| (file.uri().to_string(), file.path()));
        let images = local_images(picked);
        if images.is_empty() {
            warn!("no local images in the picked files; keeping the previous selection");
            return;
        }
        state.borrow_mut().controller.set_images(images);
        refresh_preview(&state.borrow());
    });
}

/// Keeps files with a local path; pictures load from the filesystem.
fn local_images(picked: impl Iterator<Item = (String, Option<PathBuf>)>) -> Vec<ImageRef> {
    picked
        .filter_map(|(uri, path)| match path {
            Some(path) => Some(ImageRef::new(path.to_string_lossy())),
            None => {
                warn!(%uri, "skipping picked file without a local path");
                None
            }
        })
        .collect()
}

pub(super) fn refresh_preview(st: &AppState) {
    let selection = st.controller.selection();
    if let Some(label) = &st.image_count_label {
        label.set_text(&selection.summary());
    }
    let Some(preview) = &st.preview_box else {
        return;
    };
    while let Some(child) = preview.first_child() {
        preview.remove(&child);
    }
    for image in selection.preview() {
        let picture = gtk::Picture::for_filename(image.as_str());
        picture.set_content_fit(gtk::ContentFit::Cover);
        picture.set_size_request(PREVIEW_SIZE, PREVIEW_SIZE);
        picture.add_css_class("picker-thumb");
        preview.append(&picture);
    }
}

pub(super) fn set_level_hint(st: &AppState) {
    let Some(label) = &st.picker_level_label else {
        return;
    };
    if let Ok(level) = st.controller.selected_level() {
        label.set_text(&format!("{}: up to {} pairs", level.name, level.pair_count));
    }
}

pub(super) fn build_picker_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.set_margin_top(CONTENT_MARGIN * 2);
    root.set_margin_bottom(CONTENT_MARGIN * 2);
    root.set_margin_start(CONTENT_MARGIN * 2);
    root.set_margin_end(CONTENT_MARGIN * 2);
    root.add_css_class("picker-root");

    let title = gtk::Label::new(Some("Choose your images"));
    title.add_css_class("title-2");

    let level_hint = gtk::Label::new(None);
    level_hint.add_css_class("dim-label");

    let choose_button = gtk::Button::with_label("Browse…");
    choose_button.set_halign(gtk::Align::Center);
    choose_button.connect_clicked({
        let state = state.clone();
        move |_| open_images(&state)
    });

    let count_label = gtk::Label::new(Some("0 images selected"));
    count_label.add_css_class("caption");

    let preview = gtk::FlowBox::new();
    preview.set_selection_mode(gtk::SelectionMode::None);
    preview.set_max_children_per_line(5);
    preview.set_column_spacing(6);
    preview.set_row_spacing(6);
    preview.set_halign(gtk::Align::Center);
    preview.set_vexpand(true);
    preview.set_valign(gtk::Align::Start);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    buttons.set_halign(gtk::Align::Center);

    let back_button = gtk::Button::with_label("Back");
    back_button.connect_clicked({
        let state = state.clone();
        move |_| leave_image_picker(&state)
    });

    let start_button = gtk::Button::with_label("Start");
    start_button.add_css_class("suggested-action");
    start_button.connect_clicked({
        let state = state.clone();
        move |_| begin_round(&state)
    });

    buttons.append(&back_button);
    buttons.append(&start_button);

    root.append(&title);
    root.append(&level_hint);
    root.append(&choose_button);
    root.append(&count_label);
    root.append(&preview);
    root.append(&buttons);

    {
        let mut st = state.borrow_mut();
        st.image_count_label = Some(count_label);
        st.preview_box = Some(preview);
        st.picker_level_label = Some(level_hint);
    }

    root
}
