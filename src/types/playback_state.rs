#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Paused,
    Playing,
}

/// Display mirror of the session clock.
///
/// While `is_tracking` is set the user owns `value` and timer ticks must
/// leave it alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    pub minimum: f64,
    pub maximum: f64,
    pub value: f64,
    pub is_tracking: bool,
}

impl SliderState {
    pub fn new(duration: f64) -> Self {
        Self {
            minimum: 0.0,
            maximum: duration.max(0.0),
            value: 0.0,
            is_tracking: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub dismiss_label: String,
}

/// Everything the screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    pub button_selected: bool,
    pub button_enabled: bool,
    pub time_text: String,
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_value: f64,
    pub alert: Option<Alert>,
}

impl ScreenState {
    /// Controls accept input only with a loaded session and no alert up.
    pub fn controls_enabled(&self) -> bool {
        self.button_enabled && self.alert.is_none()
    }
}

/// Input collected from the widgets during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    TogglePlayPause,
    SliderDragStarted,
    SliderDragged(f64),
    SliderDragEnded(f64),
    SliderClicked(f64),
    AlertDismissed,
}
