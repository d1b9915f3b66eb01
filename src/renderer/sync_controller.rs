use crate::ops::sync_timer::SyncTimer;
use crate::ops::time_format::format_time;
use crate::types::playback_state::{Alert, PlaybackPhase, ScreenState, SliderState, UiEvent};
use crate::types::session::{clamp_time, PlaybackEngine, PlaybackEvent, SessionError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Keeps the playback clock, the polling timer and the slider in step.
///
/// The controller never touches widgets. The UI reports [`UiEvent`]s and
/// draws whatever [`SyncController::render_state`] returns.
pub struct SyncController<E: PlaybackEngine> {
    session: Option<E>,
    timer: SyncTimer,
    slider: SliderState,
    phase: PlaybackPhase,
    alert: Option<Alert>,
}

impl<E: PlaybackEngine> SyncController<E> {
    /// `session` is `None` when the asset could not be loaded; the screen
    /// still works but playback stays disabled.
    pub fn new(session: Option<E>, tick_interval: Duration) -> Self {
        let duration = session.as_ref().map(|s| s.duration()).unwrap_or(0.0);
        let mut slider = SliderState::new(duration);
        if let Some(session) = &session {
            slider.value = session.current_time();
        }
        Self {
            session,
            timer: SyncTimer::new(tick_interval),
            slider,
            phase: PlaybackPhase::Paused,
            alert: None,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&E> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> Option<&mut E> {
        self.session.as_mut()
    }

    #[cfg(test)]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// How long the UI loop may idle before the controller needs a frame.
    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_next(now)
    }

    /// Apply one UI event. While an alert is up only its dismissal counts.
    pub fn handle(&mut self, event: UiEvent, now: Instant) {
        if self.alert.is_some() && event != UiEvent::AlertDismissed {
            debug!("Ignoring {:?} behind the alert", event);
            return;
        }
        match event {
            UiEvent::TogglePlayPause => self.toggle_play_pause(now),
            UiEvent::SliderDragStarted => self.on_slider_drag_start(),
            UiEvent::SliderDragged(value) => self.on_slider_drag(value),
            UiEvent::SliderDragEnded(value) => self.on_slider_drag_end(value),
            UiEvent::SliderClicked(value) => self.on_slider_click(value),
            UiEvent::AlertDismissed => self.dismiss_alert(),
        }
    }

    pub fn toggle_play_pause(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            warn!("Play/pause ignored: no audio session loaded");
            return;
        };
        match self.phase {
            PlaybackPhase::Paused => {
                session.play();
                if !session.is_playing() {
                    // The engine queues the failure as an event.
                    warn!("Playback did not start");
                    return;
                }
                self.timer.start(now);
                self.phase = PlaybackPhase::Playing;
                info!("Playing from {:.2}s", session.current_time());
            }
            PlaybackPhase::Playing => {
                session.pause();
                self.timer.stop();
                self.phase = PlaybackPhase::Paused;
                info!("Paused at {:.2}s", session.current_time());
            }
        }
    }

    pub fn on_slider_drag_start(&mut self) {
        debug!("Slider tracking started");
        self.slider.is_tracking = true;
    }

    /// Live label update while dragging. The session is left alone.
    pub fn on_slider_drag(&mut self, value: f64) {
        self.slider.value = clamp_time(value, self.slider.maximum);
    }

    pub fn on_slider_drag_end(&mut self, value: f64) {
        debug!("Slider tracking ended at {:.2}s", value);
        self.slider.is_tracking = false;
        self.seek_to(value);
    }

    /// A value change without a drag, e.g. a click on the track.
    pub fn on_slider_click(&mut self, value: f64) {
        if self.slider.is_tracking {
            self.on_slider_drag(value);
        } else {
            self.seek_to(value);
        }
    }

    fn seek_to(&mut self, value: f64) {
        let value = clamp_time(value, self.slider.maximum);
        self.slider.value = value;
        if let Some(session) = self.session.as_mut() {
            session.seek(value);
            self.slider.value = session.current_time();
        }
    }

    pub fn on_playback_finished(&mut self) {
        info!("Playback finished");
        self.timer.stop();
        if let Some(session) = self.session.as_mut() {
            session.pause();
            session.seek(0.0);
        }
        self.slider.value = 0.0;
        self.phase = PlaybackPhase::Paused;
    }

    /// Runtime decode failures end the session; playback stays disabled.
    pub fn on_decode_error(&mut self, detail: Option<String>) {
        self.timer.stop();
        if let Some(mut session) = self.session.take() {
            session.pause();
        }
        self.slider.is_tracking = false;
        self.phase = PlaybackPhase::Paused;

        match detail {
            Some(detail) => {
                let err = SessionError::DecodeRuntime(detail);
                error!("{}", err);
                self.alert = Some(Alert {
                    title: "Notice".to_string(),
                    message: err.to_string(),
                    dismiss_label: "OK".to_string(),
                });
            }
            None => error!("Audio decode error without detail"),
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Drain engine events, then run a timer tick if one is due.
    pub fn update(&mut self, now: Instant) {
        while let Some(event) = self.session.as_mut().and_then(|s| s.poll_event()) {
            match event {
                PlaybackEvent::Finished => self.on_playback_finished(),
                PlaybackEvent::DecodeError(detail) => self.on_decode_error(detail),
            }
        }
        if self.timer.poll(now) {
            self.tick();
        }
    }

    fn tick(&mut self) {
        // Dragging owns the displayed value.
        if self.slider.is_tracking {
            return;
        }
        if let Some(session) = self.session.as_ref() {
            self.slider.value = session.current_time();
        }
    }

    pub fn render_state(&self) -> ScreenState {
        ScreenState {
            button_selected: self.phase == PlaybackPhase::Playing,
            button_enabled: self.session.is_some(),
            time_text: format_time(self.slider.value),
            slider_min: self.slider.minimum,
            slider_max: self.slider.maximum,
            slider_value: self.slider.value,
            alert: self.alert.clone(),
        }
    }
}
