//! Tick counters for gravity and input repeat.

/// Accumulates elapsed ticks and fires once the threshold is reached.
///
/// Firing subtracts the threshold instead of resetting to zero, so a late
/// frame does not push every later firing back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCounter {
    elapsed: u32,
    threshold: u32,
}

impl TickCounter {
    /// `threshold` is clamped to at least one tick.
    pub fn new(threshold: u32) -> Self {
        Self {
            elapsed: 0,
            threshold: threshold.max(1),
        }
    }

    /// Add `ticks` and report whether the counter fired.
    ///
    /// Fires at most once per call; any surplus beyond one threshold stays
    /// in the counter for the following calls.
    pub fn advance(&mut self, ticks: u32) -> bool {
        self.elapsed = self.elapsed.saturating_add(ticks);
        if self.elapsed >= self.threshold {
            self.elapsed -= self.threshold;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_threshold() {
        let mut counter = TickCounter::new(3);
        assert!(!counter.advance(1));
        assert!(!counter.advance(1));
        assert!(counter.advance(1));
        assert_eq!(counter.elapsed(), 0);
    }

    #[test]
    fn keeps_overshoot() {
        let mut counter = TickCounter::new(3);
        assert!(counter.advance(4));
        assert_eq!(counter.elapsed(), 1);
        assert!(!counter.advance(1));
        assert!(counter.advance(1));
    }

    #[test]
    fn fires_once_per_call() {
        let mut counter = TickCounter::new(2);
        assert!(counter.advance(7));
        assert_eq!(counter.elapsed(), 5);
        assert!(counter.advance(0));
        assert!(counter.advance(0));
        assert_eq!(counter.elapsed(), 1);
        assert!(!counter.advance(0));
    }

    #[test]
    fn zero_threshold_is_one_tick() {
        let mut counter = TickCounter::new(0);
        assert_eq!(counter.threshold(), 1);
        assert!(counter.advance(1));
    }
}
