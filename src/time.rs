//! Logical time and single-slot debounced timers.
//!
//! Every handler receives the current time explicitly so the controller stays
//! deterministic; the tokio runtime is the only place wall-clock time is read.

/// Logical milliseconds since the host started feeding the controller.
pub type Millis = u64;

/// A debounced schedule holding at most one pending fire time.
///
/// Scheduling while a fire is pending replaces it (last writer wins). Cancelling is
/// synchronous and never waits for anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<Millis>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedule a fire `delay` after `now`, cancelling any pending one.
    pub fn schedule(&mut self, now: Millis, delay: Millis) {
        self.deadline = Some(now.saturating_add(delay));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Consume the pending fire if it is due at `now`, returning its deadline.
    pub fn take_due(&mut self, now: Millis) -> Option<Millis> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                Some(deadline)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescheduling_replaces_pending_fire() {
        let mut slot = TimerSlot::new();
        slot.schedule(0, 2000);
        slot.schedule(500, 2000);

        assert_eq!(slot.deadline(), Some(2500));
        assert_eq!(slot.take_due(2000), None);
        assert_eq!(slot.take_due(2500), Some(2500));
        assert!(!slot.is_pending());
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut slot = TimerSlot::new();
        slot.schedule(42, 0);
        assert_eq!(slot.take_due(42), Some(42));
    }

    #[test]
    fn cancel_clears_pending_fire() {
        let mut slot = TimerSlot::new();
        slot.schedule(0, 10);
        slot.cancel();
        assert_eq!(slot.take_due(u64::MAX), None);
    }
}
