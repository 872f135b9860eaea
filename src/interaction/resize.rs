//! Coalescing of viewport resize notifications

/// Quiet period after the last resize before the layout is recomputed
pub const RESIZE_DEBOUNCE_MS: f64 = 200.0;

/// Trailing-edge debouncer driven by caller-supplied timestamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Record a notification, pushing any pending deadline back
    pub fn schedule(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per quiet period, when it has elapsed
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_period() {
        let mut debounce = Debouncer::default();
        debounce.schedule(0.0);
        assert!(!debounce.poll(199.0));
        assert!(debounce.poll(200.0));
        assert!(!debounce.poll(400.0));
    }

    #[test]
    fn test_burst_coalesces_to_one() {
        let mut debounce = Debouncer::default();
        let mut fired = 0;
        for t in (0..1000).step_by(50) {
            debounce.schedule(t as f64);
            if debounce.poll(t as f64) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);
        assert!(debounce.poll(1150.0));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_idle_never_fires() {
        let mut debounce = Debouncer::new(10.0);
        assert!(!debounce.poll(1_000_000.0));
    }
}
