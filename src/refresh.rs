//! Periodic reload schedule for the interactive view.
//!
//! The event loop polls [`RefreshSchedule::due`]; nothing runs in the
//! background, so cancelling is just flipping the schedule off.
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RefreshSchedule {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl RefreshSchedule {
    pub fn every(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            cancelled: false,
        }
    }

    /// True once per elapsed interval. `busy` defers the tick (and keeps it
    /// pending) while the user has an adoption open.
    pub fn due(&mut self, now: Instant, busy: bool) -> bool {
        if self.cancelled || busy || now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    /// Push the next tick out after a manual reload.
    pub fn reset(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    pub fn cancel(&mut self) {
        if !self.cancelled {
            tracing::debug!("refresh schedule cancelled");
        }
        self.cancelled = true;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Drop for RefreshSchedule {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut schedule = RefreshSchedule::every(Duration::from_secs(30), start);
        assert!(!schedule.due(start + Duration::from_secs(29), false));
        assert!(schedule.due(start + Duration::from_secs(30), false));
        assert!(!schedule.due(start + Duration::from_secs(31), false));
        assert!(schedule.due(start + Duration::from_secs(61), false));
    }

    #[test]
    fn busy_session_defers_without_losing_the_tick() {
        let start = Instant::now();
        let mut schedule = RefreshSchedule::every(Duration::from_secs(10), start);
        let late = start + Duration::from_secs(15);
        assert!(!schedule.due(late, true));
        assert!(schedule.due(late, false));
    }

    #[test]
    fn cancelled_schedule_never_fires() {
        let start = Instant::now();
        let mut schedule = RefreshSchedule::every(Duration::from_secs(1), start);
        schedule.cancel();
        assert!(schedule.is_cancelled());
        assert!(!schedule.due(start + Duration::from_secs(60), false));
    }

    #[test]
    fn reset_pushes_next_tick() {
        let start = Instant::now();
        let mut schedule = RefreshSchedule::every(Duration::from_secs(10), start);
        schedule.reset(start + Duration::from_secs(8));
        assert!(!schedule.due(start + Duration::from_secs(12), false));
        assert!(schedule.due(start + Duration::from_secs(18), false));
    }
}
