//! Restartable quiet-period timer
//!
//! Each `schedule` cancels the pending deadline and starts a new one, so a
//! burst of triggers fires exactly once, one delay after the last trigger.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    pending: Option<(Instant, u64)>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the timer for `revision`
    pub fn schedule(&mut self, revision: u64, delay: Duration, now: Instant) {
        self.pending = Some((now + delay, revision));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(deadline, _)| deadline)
    }

    /// Time left until the deadline (zero if already due)
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Take the pending revision if its deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> Option<u64> {
        match self.pending {
            Some((deadline, revision)) if now >= deadline => {
                self.pending = None;
                Some(revision)
            }
            _ => None,
        }
    }
}
