use std::time::{Duration, Instant};

/// Fixed-interval progress poll, driven cooperatively by the owner's loop.
///
/// Nothing runs on its own: the owner asks `due(now)` on every turn of its
/// loop and does the work when it returns true.
#[derive(Debug, Clone)]
pub struct ProgressPoll {
    interval: Duration,
    next_due: Option<Instant>,
}

impl ProgressPoll {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whether a poll is due at `now`; schedules the following one if so.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(at) if now >= at => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next poll, `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|at| at.saturating_duration_since(now))
    }
}
