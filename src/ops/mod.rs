pub mod sync_timer;
pub mod time_format;
