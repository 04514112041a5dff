use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_no_images_dialog(parent: Option<&adw::ApplicationWindow>) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("No images"),
        Some("Select at least 1 image to start a round."),
    );
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(parent);
    dialog
}

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("How to play"),
        Some(
            "Pick a level, then choose your own pictures.\n\
Each picture appears on two cards. Turn over two cards at a time\n\
and find every pair before the time runs out.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Pairs")
        .application_icon("io.github.pairs")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("A memory game played with your own pictures.")
        .build();
    dialog.add_legal_section("Pairs", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
