//! Minimum spacing between accepted touches
//!
//! A single physical tap often arrives as several complete reports. Only
//! the first one that clears the cooldown is acted on. Rejected touches do
//! not move the window, so a long burst cannot keep extending it.

use std::time::{Duration, Instant};

/// Default spacing between two accepted touches
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    period: Duration,
    last_accepted: Option<Instant>,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_accepted: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Accept a touch seen at `now` if the cooldown has elapsed.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.period
        {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }

    /// Restart the cooldown at `now` without a touch.
    pub fn stamp(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }

    pub fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}
