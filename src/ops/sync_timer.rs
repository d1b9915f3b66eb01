use std::time::{Duration, Instant};

/// Repeating poll schedule driven by the UI loop.
///
/// Nothing runs in the background. The owner calls [`SyncTimer::poll`] once
/// per frame and does its tick work when it returns `true`.
#[derive(Debug, Clone)]
pub struct SyncTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl SyncTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arms the timer. The first tick is due immediately.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    /// Disarms the timer. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns `true` when a tick is due at `now` and schedules the next one.
    ///
    /// Missed periods collapse into a single tick; each tick reads the clock
    /// fresh, so replaying them would only repeat the same write.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// How long the loop may sleep before the next tick, if any.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(10);

    #[test]
    fn test_first_tick_fires_on_start() {
        let t0 = Instant::now();
        let mut timer = SyncTimer::new(TICK);
        assert!(!timer.poll(t0));
        timer.start(t0);
        assert!(timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(5)));
        assert!(timer.poll(t0 + TICK));
    }

    #[test]
    fn test_late_poll_collapses_missed_ticks() {
        let t0 = Instant::now();
        let mut timer = SyncTimer::new(TICK);
        timer.start(t0);
        assert!(timer.poll(t0));
        let late = t0 + Duration::from_millis(95);
        assert!(timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(9)));
        assert_eq!(timer.time_until_next(late), Some(TICK));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let t0 = Instant::now();
        let mut timer = SyncTimer::new(TICK);
        timer.stop();
        timer.start(t0);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
        assert_eq!(timer.time_until_next(t0), None);
    }
}
