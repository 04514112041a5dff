use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use tracing::{error, warn};

use pairs::game::{CardId, LevelPreset, Overlay, RoundController, RoundEvent, RoundId, Screen};
use pairs::{GameConfig, GameError};

use super::board::{CONTENT_MARGIN, mark_matched, show_back, show_front};
use super::dialogs::{show_about_dialog, show_instructions_dialog, show_no_images_dialog};
use super::hud::{set_level, set_moves, set_time, start_timer, stop_timer};
use super::picker::{build_picker_view, refresh_preview, set_level_hint};
use super::scene::{build_lose_panel, build_win_panel, rebuild_board, sync_overlay, sync_screen};
use super::state::AppState;

const APP_ID: &str = "io.github.pairs";

/// Applies controller events to the widgets and schedules the delayed
/// callbacks they ask for.
pub(super) fn apply_events(state: &Rc<RefCell<AppState>>, events: Vec<RoundEvent>) {
    for event in events {
        match event {
            RoundEvent::RoundStarted { round, level, .. } => {
                rebuild_board(state);
                {
                    let st = state.borrow();
                    set_level(&st, &level);
                    sync_screen(&st);
                }
                if level.is_timed() {
                    start_timer(state, round);
                } else {
                    stop_timer(&mut state.borrow_mut());
                }
            }
            RoundEvent::CardRevealed(id) => show_front(&state.borrow(), id),
            RoundEvent::MovesChanged(moves) => set_moves(&state.borrow(), moves),
            RoundEvent::PairMatched(first, second) => {
                let st = state.borrow();
                mark_matched(&st, first);
                mark_matched(&st, second);
            }
            RoundEvent::MismatchPending { round, delay_ms } => {
                schedule_mismatch_hide(state, round, delay_ms);
            }
            RoundEvent::CardsHidden(ids) => {
                let st = state.borrow();
                for id in ids {
                    show_back(&st, id);
                }
            }
            RoundEvent::TimeChanged(remaining) => set_time(&state.borrow(), remaining),
            RoundEvent::RoundWon { round, dwell_ms } => {
                let mut st = state.borrow_mut();
                stop_timer(&mut st);
                sync_overlay(&st);
                drop(st);
                schedule_win_return(state, round, dwell_ms);
            }
            RoundEvent::RoundLost { .. } => {
                let mut st = state.borrow_mut();
                stop_timer(&mut st);
                sync_overlay(&st);
            }
            RoundEvent::ReturnedToMenu => {
                let mut st = state.borrow_mut();
                stop_timer(&mut st);
                refresh_preview(&st);
                sync_screen(&st);
            }
        }
    }
}

fn schedule_mismatch_hide(state: &Rc<RefCell<AppState>>, round: RoundId, delay_ms: u64) {
    let state = state.clone();
    glib::timeout_add_local_once(Duration::from_millis(delay_ms), move || {
        let events = state.borrow_mut().controller.hide_mismatch(round);
        apply_events(&state, events);
    });
}

fn schedule_win_return(state: &Rc<RefCell<AppState>>, round: RoundId, dwell_ms: u64) {
    let state = state.clone();
    glib::timeout_add_local_once(Duration::from_millis(dwell_ms), move || {
        let events = state.borrow_mut().controller.finish_win(round);
        apply_events(&state, events);
    });
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, id: CardId) {
    let events = state.borrow_mut().controller.select_card(id);
    apply_events(state, events);
}

fn choose_level(state: &Rc<RefCell<AppState>>, index: usize) {
    let result = state.borrow_mut().controller.select_level(index);
    match result {
        Ok(_) => {
            let st = state.borrow();
            set_level_hint(&st);
            refresh_preview(&st);
            sync_screen(&st);
        }
        Err(err) => warn!(%err, "level not available"),
    }
}

fn report_start_error(state: &Rc<RefCell<AppState>>, err: GameError) {
    match err {
        GameError::NoImagesSelected => {
            let window = state.borrow().window.clone();
            show_no_images_dialog(window.as_ref());
        }
        err => error!(%err, "round could not start"),
    }
}

pub(super) fn begin_round(state: &Rc<RefCell<AppState>>) {
    let result = state.borrow_mut().controller.start_round();
    match result {
        Ok(events) => apply_events(state, events),
        Err(err) => report_start_error(state, err),
    }
}

fn retry_round(state: &Rc<RefCell<AppState>>) {
    let result = state.borrow_mut().controller.retry();
    match result {
        Ok(events) => apply_events(state, events),
        Err(err) => report_start_error(state, err),
    }
}

pub(super) fn leave_image_picker(state: &Rc<RefCell<AppState>>) {
    let events = state.borrow_mut().controller.back_from_images();
    apply_events(state, events);
}

fn leave_game(state: &Rc<RefCell<AppState>>) {
    let events = {
        let mut st = state.borrow_mut();
        if st.controller.overlay() == Some(Overlay::Lose) {
            st.controller.back_to_menu()
        } else {
            st.controller.go_back()
        }
    };
    apply_events(state, events);
}

fn handle_back(state: &Rc<RefCell<AppState>>) {
    let screen = state.borrow().controller.screen();
    match screen {
        Screen::Menu => {}
        Screen::ImagePicker => leave_image_picker(state),
        Screen::Game => leave_game(state),
    }
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let controller = match RoundController::new(GameConfig::default()) {
            Ok(controller) => controller,
            Err(err) => {
                error!(%err, "invalid game configuration");
                app.quit();
                return;
            }
        };
        let state = Rc::new(RefCell::new(AppState::new(controller)));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let title_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_box.set_valign(gtk::Align::Center);
        let title_main = gtk::Label::builder()
            .label("Pairs")
            .css_classes(vec!["game-title-main"])
            .build();
        let title_subtitle = gtk::Label::builder()
            .label("")
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();
        title_box.append(&title_main);
        title_box.append(&title_subtitle);

        let header = adw::HeaderBar::builder().title_widget(&title_box).build();
        header.add_css_class("flat");

        let back_button = gtk::Button::builder()
            .icon_name("go-previous-symbolic")
            .build();
        back_button.set_tooltip_text(Some("Back"));
        back_button.connect_clicked({
            let state = state.clone();
            move |_| handle_back(&state)
        });
        header.pack_start(&back_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("How to Play"), Some("app.instructions"));
        menu_model.append(Some("About Pairs"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();
        header.pack_end(&menu_button);

        let transition_ms = state.borrow().controller.config().screen_activation_delay_ms;
        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_hhomogeneous(false);
        view_stack.set_vhomogeneous(false);
        view_stack.set_transition_duration(u32::try_from(transition_ms).unwrap_or(u32::MAX));

        let menu_view = build_menu_view(&state);
        view_stack.add_named(&menu_view, Some(Screen::Menu.name()));

        let picker_view = build_picker_view(&state);
        view_stack.add_named(&picker_view, Some(Screen::ImagePicker.name()));

        let game_view = build_game_view(&state);
        view_stack.add_named(&game_view, Some(Screen::Game.name()));

        let toolbar = adw::ToolbarView::new();
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Pairs")
            .default_width(860)
            .default_height(680)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 560);

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, _| {
                if key == gdk::Key::Escape && state.borrow().controller.screen() != Screen::Menu {
                    handle_back(&state);
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        {
            let mut st = state.borrow_mut();
            st.window = Some(win.clone());
            st.view_stack = Some(view_stack);
            st.back_button = Some(back_button);
            st.title_game_subtitle = Some(title_subtitle);
            sync_screen(&st);
        }

        win.present();
    });

    app.run()
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        if let Err(err) = gio::resources_register_include!("pairs.gresource") {
            error!(%err, "failed to register embedded resources");
        }
    });

    let Some(display) = gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource("/io/github/pairs/style.css");
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn level_caption(level: &LevelPreset) -> String {
    match level.time_limit_secs {
        Some(secs) => format!("{} pairs · {} s", level.pair_count, secs),
        None => format!("{} pairs · no time limit", level.pair_count),
    }
}

fn build_menu_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("main-menu-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_vexpand(true);

    let title = gtk::Label::new(Some("Pairs"));
    title.add_css_class("title-1");
    let subtitle = gtk::Label::new(Some("Choose a level"));
    subtitle.add_css_class("dim-label");
    content.append(&title);
    content.append(&subtitle);

    let buttons_box = gtk::Box::new(gtk::Orientation::Vertical, 12);
    buttons_box.set_halign(gtk::Align::Center);
    buttons_box.set_margin_top(18);

    let levels: Vec<LevelPreset> = state.borrow().controller.levels().iter().cloned().collect();
    for (index, level) in levels.iter().enumerate() {
        let label_box = gtk::Box::new(gtk::Orientation::Vertical, 2);
        let name = gtk::Label::new(Some(&level.name));
        name.add_css_class("heading");
        let caption = gtk::Label::new(Some(&level_caption(level)));
        caption.add_css_class("caption");
        label_box.append(&name);
        label_box.append(&caption);

        let button = gtk::Button::builder().child(&label_box).build();
        button.add_css_class("main-menu-button");
        button.set_size_request(200, 52);
        button.connect_clicked({
            let state = state.clone();
            move |_| choose_level(&state, index)
        });
        buttons_box.append(&button);
    }

    content.append(&buttons_box);
    root.append(&content);
    root
}

fn hud_counter(caption: &str, initial: &str) -> (gtk::Box, gtk::Label) {
    let container = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let caption = gtk::Label::new(Some(caption));
    caption.add_css_class("dim-label");
    let value = gtk::Label::new(Some(initial));
    value.add_css_class("hud-value");
    value.add_css_class("numeric");
    container.append(&caption);
    container.append(&value);
    (container, value)
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);
    root.add_css_class("game-root");

    let hud = gtk::Box::new(gtk::Orientation::Horizontal, 24);
    hud.set_halign(gtk::Align::Center);
    hud.add_css_class("hud");

    let level_label = gtk::Label::new(None);
    level_label.add_css_class("heading");
    let (moves_box, moves_label) = hud_counter("Moves", "0");
    let (time_box, time_label) = hud_counter("Time", "0");
    time_box.set_visible(false);

    hud.append(&level_label);
    hud.append(&moves_box);
    hud.append(&time_box);

    let board_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_container.set_hexpand(true);
    board_container.set_vexpand(true);
    board_container.add_css_class("pairs-board-container");

    let win_panel = build_win_panel();
    let lose_panel = build_lose_panel(
        {
            let state = state.clone();
            move || retry_round(&state)
        },
        {
            let state = state.clone();
            move || leave_game(&state)
        },
    );

    let overlay = gtk::Overlay::new();
    overlay.set_hexpand(true);
    overlay.set_vexpand(true);
    overlay.set_child(Some(&board_container));
    overlay.add_overlay(&win_panel);
    overlay.add_overlay(&lose_panel);

    root.append(&hud);
    root.append(&overlay);

    {
        let mut st = state.borrow_mut();
        st.board_container = Some(board_container);
        st.level_label = Some(level_label);
        st.moves_label = Some(moves_label);
        st.time_box = Some(time_box);
        st.time_label = Some(time_label);
        st.win_panel = Some(win_panel);
        st.lose_panel = Some(lose_panel);
    }

    root
}
