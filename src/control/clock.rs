use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Monotonic time in seconds since some fixed origin.
///
/// The grace-period and alert-throttle arithmetic reads time only through
/// this trait, so tests can drive elapsed time explicitly instead of
/// sleeping.
pub trait Clock: Send {
    fn now(&self) -> f64;
}

/// Wall-clock implementation backed by `Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-cranked clock for deterministic tests. Clones share the same
/// underlying time, so a test can keep one handle and advance it while the
/// control loop holds the other.
#[derive(Clone)]
pub struct ManualClock {
    seconds: Arc<Mutex<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { seconds: Arc::new(Mutex::new(0.0)) }
    }

    pub fn advance(&self, seconds: f64) {
        if let Ok(mut t) = self.seconds.lock() {
            *t += seconds;
        }
    }

    pub fn set(&self, seconds: f64) {
        if let Ok(mut t) = self.seconds.lock() {
            *t = seconds;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.lock().map(|t| *t).unwrap_or(0.0)
    }
}
