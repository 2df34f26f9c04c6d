//! Rate limit for resolution passes.

use std::time::{Duration, Instant};

use fd_core::DispatchConfig;

/// Lets at most one resolution pass through per `interval` of real time.
///
/// The first call to [`ready`](Self::ready) always passes.
#[derive(Debug, Clone)]
pub struct ResolutionThrottle {
    interval: Duration,
    last:     Option<Instant>,
}

impl ResolutionThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(Duration::from_millis(config.resolution_interval_ms))
    }

    /// `true` (and the window restarts) if at least `interval` has passed
    /// since the last pass that went through.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_passes() {
        let mut t = ResolutionThrottle::new(Duration::from_millis(500));
        assert!(t.ready(Instant::now()));
    }

    #[test]
    fn passes_once_per_interval() {
        let start = Instant::now();
        let mut t = ResolutionThrottle::new(Duration::from_millis(500));
        let frame = Duration::from_millis(100);
        let passed: Vec<u32> = (0..12)
            .filter(|&i| t.ready(start + frame * i))
            .collect();
        assert_eq!(passed, vec![0, 5, 10]);
    }

    #[test]
    fn zero_interval_always_passes() {
        let now = Instant::now();
        let mut t = ResolutionThrottle::from_config(&DispatchConfig {
            resolution_interval_ms: 0,
            ..Default::default()
        });
        assert!(t.ready(now));
        assert!(t.ready(now));
    }
}
