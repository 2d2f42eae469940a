//! Poll cadence gate.
//!
//! The binaries spin faster than the control cadence (to keep the
//! watchdog fed); [`PollGate`] decides which loop iterations actually run
//! a poll cycle.  The first check fires immediately so the system acts on
//! boot rather than waiting out a full interval.

/// Fixed-interval gate over a caller-supplied millisecond clock.
pub struct PollGate {
    interval_ms: u64,
    last_poll_ms: Option<u64>,
}

impl PollGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_poll_ms: None,
        }
    }

    /// Whether a poll cycle is due at `now_ms`.  Firing records `now_ms`
    /// as the new cycle origin.
    pub fn should_poll(&mut self, now_ms: u64) -> bool {
        let due = match self.last_poll_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };
        if due {
            self.last_poll_ms = Some(now_ms);
        }
        due
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_fires_immediately() {
        let mut gate = PollGate::new(6_000);
        assert!(gate.should_poll(0));
    }

    #[test]
    fn gated_until_interval_elapses() {
        let mut gate = PollGate::new(6_000);
        assert!(gate.should_poll(100));
        assert!(!gate.should_poll(3_000));
        assert!(!gate.should_poll(6_099));
        assert!(gate.should_poll(6_100), "fires at exactly one interval");
        assert!(!gate.should_poll(6_200));
    }

    #[test]
    fn firing_rebases_the_interval() {
        let mut gate = PollGate::new(1_000);
        assert!(gate.should_poll(0));
        assert!(gate.should_poll(2_500)); // late fire
        assert!(!gate.should_poll(3_000), "interval restarts at the late fire");
        assert!(gate.should_poll(3_500));
    }
}
