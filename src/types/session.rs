use thiserror::Error;

/// Why a session could not be created or stopped playing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("audio asset `{name}` is not available: {detail}")]
    AssetMissing { name: String, detail: String },
    #[error("failed to initialize player: {0}")]
    DecodeInit(String),
    #[error("Audio player error: {0}")]
    DecodeRuntime(String),
}

/// Something the engine reports back to the controller between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback reached the end of the asset on its own.
    Finished,
    /// The stream failed while playing. The detail is absent when the
    /// engine could not describe the failure.
    DecodeError(Option<String>),
}

/// A loaded audio resource with a playback clock.
///
/// Times are in seconds. `duration` is fixed once the session exists and
/// `current_time` always lies within `[0, duration]`.
pub trait PlaybackEngine {
    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Moves the clock to `time` clamped into `[0, duration]`.
    fn seek(&mut self, time: f64);
    /// Returns the next pending event without blocking.
    fn poll_event(&mut self) -> Option<PlaybackEvent>;
}

pub fn clamp_time(time: f64, duration: f64) -> f64 {
    if time.is_nan() {
        return 0.0;
    }
    time.clamp(0.0, duration.max(0.0))
}
