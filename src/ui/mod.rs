pub mod app;
mod board;
mod dialogs;
mod hud;
mod picker;
mod scene;
mod state;
