pub mod alert;
pub mod app;
pub mod player_panel;
