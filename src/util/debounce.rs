//! Trailing-edge debouncer
//!
//! Collapses a burst of submissions into the last one, released only after
//! the delay has passed with no newer submission. Time is passed in by the
//! caller, so tests don't need to sleep.

use std::time::{Duration, Instant};

/// Holds the latest submitted value until it has been quiet long enough
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Submit a value, replacing any pending one and restarting the delay
    pub fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value if its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_after_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        debouncer.submit(1, t0);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(50)), None);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(100)), Some(1));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_newer_submission_wins_and_resets() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        debouncer.submit(1, t0);
        debouncer.submit(2, t0 + Duration::from_millis(80));

        // The first deadline has passed but was superseded
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(120)), None);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(180)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        debouncer.submit(1, t0);
        debouncer.cancel();
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_poll_is_one_shot() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        debouncer.submit(1, t0);
        let later = t0 + Duration::from_millis(200);
        assert_eq!(debouncer.poll(later), Some(1));
        assert_eq!(debouncer.poll(later), None);
    }
}
