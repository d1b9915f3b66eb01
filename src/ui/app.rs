use crate::renderer::sync_controller::SyncController;
use crate::types::playback_state::UiEvent;
use crate::types::session::PlaybackEngine;
use crate::ui::alert::alert_window;
use crate::ui::player_panel::player_panel;
use eframe::egui;
use std::time::Instant;

pub struct PlayerApp<E: PlaybackEngine> {
    pub controller: SyncController<E>,
}

impl<E: PlaybackEngine> PlayerApp<E> {
    pub fn new(controller: SyncController<E>) -> Self {
        Self { controller }
    }
}

impl<E: PlaybackEngine> eframe::App for PlayerApp<E> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        // Engine events and the sync tick run before anything is drawn.
        self.controller.update(now);

        let screen = self.controller.render_state();
        let mut events: Vec<UiEvent> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            events.extend(player_panel(ui, &screen));
        });

        if let Some(alert) = &screen.alert {
            if alert_window(ctx, alert) {
                events.push(UiEvent::AlertDismissed);
            }
        }

        let had_events = !events.is_empty();
        for event in events {
            self.controller.handle(event, now);
        }

        if had_events {
            ctx.request_repaint();
        } else if let Some(wait) = self.controller.next_wake(Instant::now()) {
            // Keep ticking while the timer is armed.
            ctx.request_repaint_after(wait);
        }
    }
}
