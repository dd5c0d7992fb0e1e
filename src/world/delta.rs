//! Frame delta timer

/// Tracks time between ticks
///
/// Timestamps are in milliseconds; the delta is in seconds.
#[derive(Debug, Clone, Copy)]
pub struct DeltaTimer {
    last_update: f64,
    delta: f64,
}

impl DeltaTimer {
    pub fn new(now: f64) -> Self {
        Self {
            last_update: now,
            delta: 0.0,
        }
    }

    /// Start a new frame at `time`
    pub fn update(&mut self, time: f64) {
        self.delta = (time - self.last_update) / 1000.0;
        self.last_update = time;
    }

    /// Seconds between the last two updates
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[inline]
    pub fn last_update(&self) -> f64 {
        self.last_update
    }
}
