use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic millisecond source. Request start times and query timestamps
/// must come from the same clock so that subtracting them means something.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Milliseconds since a process-wide origin (first use).
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        let origin = ORIGIN.get_or_init(Instant::now);
        origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and replaying recorded timelines.
#[derive(Debug, Default)]
pub struct ManualClock {
    // f64 bits
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: AtomicU64::new(start_ms.to_bits()),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.store(ms.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, ms: f64) {
        let next = self.now_ms() + ms;
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.now.load(Ordering::SeqCst))
    }
}
