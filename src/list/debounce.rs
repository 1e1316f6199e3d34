/// A single cancellable pending value that becomes ready after a quiet period.
///
/// Scheduling again replaces the pending value and restarts the delay, so at
/// most one value is ever waiting. Time is supplied by the caller in
/// milliseconds from any fixed origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn schedule(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the pending value if its delay has elapsed.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<T> {
        let (_, queued_at) = self.pending.as_ref()?;
        if now_ms.saturating_sub(*queued_at) >= self.delay_ms {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// Time at which the pending value becomes ready.
    pub fn deadline(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, queued_at)| queued_at.saturating_add(self.delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_ready_only_after_delay() {
        let mut d = Debouncer::new(300);
        d.schedule("a", 1_000);
        assert_eq!(d.take_ready(1_299), None);
        assert_eq!(d.take_ready(1_300), Some("a"));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_reschedule_restarts_timer_and_replaces_value() {
        let mut d = Debouncer::new(300);
        d.schedule("a", 0);
        d.schedule("ab", 200);
        assert_eq!(d.take_ready(300), None);
        assert_eq!(d.deadline(), Some(500));
        assert_eq!(d.take_ready(500), Some("ab"));
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let mut d = Debouncer::new(300);
        d.schedule(1, 0);
        d.cancel();
        assert_eq!(d.take_ready(10_000), None);
        assert_eq!(d.deadline(), None);
    }
}
