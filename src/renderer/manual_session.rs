use crate::types::session::{clamp_time, PlaybackEngine, PlaybackEvent};
use std::collections::VecDeque;
use std::time::Duration;

/// In-memory session whose clock only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualSession {
    duration: Duration,
    position: Duration,
    playing: bool,
    finished_reported: bool,
    events: VecDeque<PlaybackEvent>,
}

impl ManualSession {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration: Duration::from_secs_f64(duration_secs),
            position: Duration::ZERO,
            playing: false,
            finished_reported: false,
            events: VecDeque::new(),
        }
    }

    /// Let `elapsed` of audio play out. Reaching the end queues `Finished`.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.position = (self.position + elapsed).min(self.duration);
        if self.position == self.duration {
            self.playing = false;
            if !self.finished_reported {
                self.finished_reported = true;
                self.events.push_back(PlaybackEvent::Finished);
            }
        }
    }

    pub fn fail(&mut self, detail: Option<&str>) {
        self.playing = false;
        self.events
            .push_back(PlaybackEvent::DecodeError(detail.map(str::to_string)));
    }
}

impl PlaybackEngine for ManualSession {
    fn duration(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    fn current_time(&self) -> f64 {
        self.position.as_secs_f64()
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.playing = true;
        self.finished_reported = false;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, time: f64) {
        self.position = Duration::from_secs_f64(clamp_time(time, self.duration()));
    }

    fn poll_event(&mut self) -> Option<PlaybackEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_clamps_to_bounds() {
        let mut session = ManualSession::new(10.0);
        session.seek(-5.0);
        assert_eq!(session.current_time(), 0.0);
        session.seek(110.0);
        assert_eq!(session.current_time(), 10.0);
    }

    #[test]
    fn test_finished_once_per_play_cycle() {
        let mut session = ManualSession::new(1.0);
        session.play();
        session.advance(Duration::from_secs(2));
        session.advance(Duration::from_secs(2));
        assert_eq!(session.poll_event(), Some(PlaybackEvent::Finished));
        assert_eq!(session.poll_event(), None);

        session.seek(0.0);
        session.play();
        session.advance(Duration::from_secs(1));
        assert_eq!(session.poll_event(), Some(PlaybackEvent::Finished));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut session = ManualSession::new(10.0);
        session.play();
        session.advance(Duration::from_millis(1500));
        session.pause();
        session.advance(Duration::from_secs(3));
        assert_eq!(session.current_time(), 1.5);
        assert!(!session.is_playing());
    }
}
