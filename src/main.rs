mod ops;
mod renderer;
mod types;
mod ui;

use crate::renderer::gst_session::GstSession;
use crate::renderer::sync_controller::SyncController;
use crate::types::session::SessionError;
use crate::types::settings::PlayerSettings;
use crate::ui::app::PlayerApp;
use eframe::egui;
use tracing::{error, info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let settings = PlayerSettings::default();
    info!("Configuration loaded: {:?}", settings);

    // Load failures leave the screen usable with playback disabled.
    let session = match GstSession::open(&settings) {
        Ok(session) => Some(session),
        Err(e @ SessionError::AssetMissing { .. }) => {
            error!("Cannot get the audio asset: {}", e);
            None
        }
        Err(e) => {
            error!("Player initialization failed: {}", e);
            None
        }
    };

    let controller = SyncController::new(session, settings.tick_interval());
    let app = PlayerApp::new(controller);

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title.as_str())
            .with_inner_size([width, height]),
        ..Default::default()
    };
    eframe::run_native(
        &settings.window_title,
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("player window failed: {}", e))?;
    Ok(())
}
