use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Startup settings for the player window and its bundled asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub asset_dir: PathBuf,
    pub asset_name: String,
    pub tick_interval_ms: u64,
    pub preroll_timeout_ms: u64,
    pub window_title: String,
    pub window_size: (f32, f32),
}

impl PlayerSettings {
    pub fn tick_interval(&self) -> Duration {
        // A zero interval would spin the repaint loop.
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn preroll_timeout(&self) -> Duration {
        Duration::from_millis(self.preroll_timeout_ms)
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            asset_name: "sound".to_string(),
            tick_interval_ms: 10,
            preroll_timeout_ms: 5_000,
            window_title: "BC Music Player".to_string(),
            window_size: (360.0, 480.0),
        }
    }
}
