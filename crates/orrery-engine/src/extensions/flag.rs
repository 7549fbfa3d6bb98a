// extensions/flag.rs
//
// Deadline-based boolean flag. Replaces the scattered setTimeout-style
// one-shot timers (manual-override windows, wheel-zoom windows) with a
// value that is read against the frame clock. Overlapping sets are
// last-writer-wins on the deadline, which keeps multiple concurrent
// windows safe.

/// A boolean flag that expires after a time-to-live, checked against
/// the caller-supplied clock (seconds).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiringFlag {
    deadline: Option<f64>,
}

impl ExpiringFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert the flag until `now + ttl`.
    pub fn set_for(&mut self, now: f64, ttl: f64) {
        self.deadline = Some(now + ttl);
    }

    /// Clear the flag immediately.
    pub fn clear(&mut self) {
        self.deadline = None;
    }

    /// Whether the flag is asserted at time `now`.
    pub fn get(&self, now: f64) -> bool {
        matches!(self.deadline, Some(d) if now < d)
    }

    /// Seconds until expiry, or zero if not asserted.
    pub fn remaining(&self, now: f64) -> f64 {
        self.deadline.map_or(0.0, |d| (d - now).max(0.0))
    }
}
