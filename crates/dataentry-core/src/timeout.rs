// Dataentry Inactivity Timeout
// Single pending deadline, polled by the host loop

use std::time::{Duration, Instant};

/// Default inactivity timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2500);

/// At most one pending inactivity deadline
///
/// Restarting always replaces the previous deadline, and a fire consumes
/// it, so a stale deadline can never fire. Cancellation is synchronous and
/// idempotent.
#[derive(Debug, Clone)]
pub struct InactivityTimer {
    duration: Duration,
    deadline: Option<Instant>,
}

impl InactivityTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the duration used by the next restart
    ///
    /// A deadline that is already pending keeps its original expiry.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Cancel any pending deadline and schedule a new one from `now`
    ///
    /// A duration too large to represent leaves nothing pending.
    pub fn restart_at(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.duration);
        if self.deadline.is_none() {
            log::warn!("Inactivity timeout of {:?} is out of range", self.duration);
        }
    }

    pub fn restart(&mut self) {
        self.restart_at(Instant::now());
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, or `None` when nothing is pending
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Check whether the deadline has passed at `now`
    ///
    /// Returns true exactly once per scheduled deadline; the fire clears it.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for InactivityTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}
