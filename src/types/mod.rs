pub mod playback_state;
pub mod session;
pub mod settings;
