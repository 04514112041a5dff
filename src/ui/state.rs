use gtk4 as gtk;
use libadwaita as adw;

use pairs::game::RoundController;

/// Widgets the event handlers touch, plus the controller they drive.
pub struct AppState {
    pub controller: RoundController,

    pub window: Option<adw::ApplicationWindow>,
    pub view_stack: Option<gtk::Stack>,
    pub back_button: Option<gtk::Button>,
    pub title_game_subtitle: Option<gtk::Label>,

    pub image_count_label: Option<gtk::Label>,
    pub preview_box: Option<gtk::FlowBox>,
    pub picker_level_label: Option<gtk::Label>,

    pub board_container: Option<gtk::Box>,
    pub level_label: Option<gtk::Label>,
    pub moves_label: Option<gtk::Label>,
    pub time_box: Option<gtk::Box>,
    pub time_label: Option<gtk::Label>,
    pub win_panel: Option<gtk::Box>,
    pub lose_panel: Option<gtk::Box>,

    pub card_buttons: Vec<gtk::Button>,
    pub card_faces: Vec<gtk::Stack>,
    pub timer_handle: Option<glib::SourceId>,
}

impl AppState {
    pub fn new(controller: RoundController) -> Self {
        AppState {
            controller,
            window: None,
            view_stack: None,
            back_button: None,
            title_game_subtitle: None,
            image_count_label: None,
            preview_box: None,
            picker_level_label: None,
            board_container: None,
            level_label: None,
            moves_label: None,
            time_box: None,
            time_label: None,
            win_panel: None,
            lose_panel: None,
            card_buttons: Vec::new(),
            card_faces: Vec::new(),
            timer_handle: None,
        }
    }
}
