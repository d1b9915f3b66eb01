pub mod asset;
pub mod gst_session;
#[cfg(test)]
pub mod manual_session;
pub mod sync_controller;
