//! Periodic liveness logging

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Fires at most once per `interval`
#[derive(Debug)]
pub struct Heartbeat {
    interval: Duration,
    last_beat: DateTime<Utc>,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_beat: Utc::now(),
        }
    }

    /// True when the interval has elapsed; the timer restarts in that case
    pub fn due(&mut self) -> bool {
        let elapsed = Utc::now().signed_duration_since(self.last_beat);
        if elapsed.to_std().unwrap_or_default() < self.interval {
            return false;
        }
        self.last_beat = Utc::now();
        true
    }
}
