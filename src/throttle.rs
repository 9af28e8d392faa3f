// src/throttle.rs

use std::{thread, time::Duration};
use tracing::trace;

/// Called once after every lookup attempt, whatever its outcome.
pub trait Pacer {
    fn pause(&mut self);
}

/// Blocking sleep of a fixed length between calls. No backoff, no jitter.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Pacer for FixedDelay {
    fn pause(&mut self) {
        if self.delay.is_zero() {
            return;
        }
        trace!(delay_ms = self.delay.as_millis() as u64, "pausing");
        thread::sleep(self.delay);
    }
}
