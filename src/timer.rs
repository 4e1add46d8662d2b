/// Accumulates frame deltas and fires once the threshold is reached.
///
/// On firing the remainder is zeroed, not reduced by `threshold`, so any
/// overrun past one period is dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    /// Period in milliseconds.
    pub threshold: f32,
    elapsed: f32,
}

impl Accumulator {
    pub fn new(threshold_ms: f32) -> Self {
        Self {
            threshold: threshold_ms,
            elapsed: 0.0,
        }
    }

    /// Add `dt` milliseconds. Returns true when the period elapsed this call.
    pub fn accumulate(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.threshold {
            self.elapsed = 0.0;
            return true;
        }
        false
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Counts a loaded duration down to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn start(&mut self, duration_ms: f32) {
        self.remaining = duration_ms;
    }

    /// Subtract `dt`. Returns true exactly on the call that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_threshold_and_discards_overrun() {
        let mut t = Accumulator::new(1000.0);
        assert!(!t.accumulate(600.0));
        assert!(t.accumulate(900.0));
        // 500ms of overrun is dropped, not carried.
        assert_eq!(t.elapsed(), 0.0);
        assert!(!t.accumulate(999.0));
        assert!(t.accumulate(1.0));
    }

    #[test]
    fn countdown_reports_completion_once() {
        let mut c = Countdown::idle();
        assert!(!c.tick(16.0));
        c.start(50.0);
        assert!(c.is_running());
        assert!(!c.tick(30.0));
        assert!(c.tick(30.0));
        assert_eq!(c.remaining(), 0.0);
        assert!(!c.tick(30.0));
    }
}
