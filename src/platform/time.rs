//! Monotonic millisecond clocks

use std::cell::Cell;

/// Source of monotonic time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Manually advanced clock for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// `performance.now()` in the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct PerformanceClock;

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(100.0);
        clock.advance(16.0);
        assert_eq!(clock.now_ms(), 116.0);
        clock.advance(-50.0);
        assert_eq!(clock.now_ms(), 116.0);
    }
}
