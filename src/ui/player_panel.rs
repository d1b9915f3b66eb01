use crate::types::playback_state::{ScreenState, UiEvent};
use eframe::egui;

/// Draws the play/pause button, the time label and the seek slider.
/// - `ui`: The egui UI context.
/// - `screen`: The state to display for this frame.
///
/// Returns whatever the user did with the controls, in the order it happened.
pub fn player_panel(ui: &mut egui::Ui, screen: &ScreenState) -> Vec<UiEvent> {
    let mut events = Vec::new();
    let enabled = screen.controls_enabled();

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);

        let label = if screen.button_selected { "Pause" } else { "Play" };
        let button = egui::Button::new(egui::RichText::new(label).size(28.0))
            .selected(screen.button_selected)
            .min_size(egui::vec2(120.0, 120.0));
        if ui.add_enabled(enabled, button).clicked() {
            events.push(UiEvent::TogglePlayPause);
        }

        ui.add_space(10.0);
        ui.label(
            egui::RichText::new(&screen.time_text)
                .monospace()
                .size(20.0)
                .strong(),
        );

        ui.add_space(30.0);
        let mut value = screen.slider_value;
        ui.spacing_mut().slider_width = (ui.available_width() - 60.0).max(60.0);
        let slider = egui::Slider::new(&mut value, screen.slider_min..=screen.slider_max)
            .show_value(false);
        let response = ui.add_enabled(enabled, slider);

        if response.drag_started() {
            events.push(UiEvent::SliderDragStarted);
        }
        if response.changed() {
            if response.dragged() {
                events.push(UiEvent::SliderDragged(value));
            } else {
                events.push(UiEvent::SliderClicked(value));
            }
        }
        if response.drag_stopped() {
            events.push(UiEvent::SliderDragEnded(value));
        }
    });

    events
}
