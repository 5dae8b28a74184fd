//! Fixed-rate step gate
//!
//! Frames arrive at the display's refresh rate. A frame is simulated only if
//! more than `min_interval` has passed since the last accepted one; the full
//! elapsed time becomes that step's `dt`. Leftover time is not carried over,
//! so the tick rate is capped at, not locked to, `1 / min_interval`.

/// Gate built from wall-clock timestamps (seconds)
#[derive(Debug, Clone)]
pub struct StepGate {
    min_interval: f64,
    max_step: f64,
    last_accepted: Option<f64>,
}

impl StepGate {
    pub fn new(min_interval: f32, max_step: f32) -> Self {
        Self {
            min_interval: f64::from(min_interval),
            max_step: f64::from(max_step),
            last_accepted: None,
        }
    }

    /// Offer a frame timestamp. Returns the step to simulate, if any.
    ///
    /// The first call only records the time. Timestamps that go backwards are
    /// rejected without moving the reference point.
    pub fn accept(&mut self, now: f64) -> Option<f32> {
        let Some(last) = self.last_accepted else {
            self.last_accepted = Some(now);
            return None;
        };

        let elapsed = now - last;
        if elapsed <= self.min_interval {
            return None;
        }
        self.last_accepted = Some(now);
        Some(elapsed.min(self.max_step) as f32)
    }
}
