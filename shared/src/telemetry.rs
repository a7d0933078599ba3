use std::time::{Duration, Instant};

/// Wall-clock timer for a single pipeline run.
pub struct Telemetry {
    start: Instant,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed().as_millis()
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
