use crate::types::playback_state::Alert;
use eframe::egui;

/// Shows `alert` as a modal dialog over the whole window. Returns `true`
/// once its button is pressed; clicks outside the dialog do nothing.
pub fn alert_window(ctx: &egui::Context, alert: &Alert) -> bool {
    let mut dismissed = false;
    egui::Modal::new(egui::Id::new("playback_alert")).show(ctx, |ui| {
        ui.set_max_width(280.0);
        ui.heading(alert.title.as_str());
        ui.add_space(6.0);
        ui.label(alert.message.as_str());
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui.button(alert.dismiss_label.as_str()).clicked() {
                dismissed = true;
            }
        });
    });
    dismissed
}
