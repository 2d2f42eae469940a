//! Anti-short-cycle interlocks.
//!
//! An interlock is a boolean gate shared by the two controllers of one
//! channel (heater/cooler, humidifier/de-humidifier): while it is engaged,
//! neither actuator may run regardless of its range decision.  Engaging is
//! always immediate; the delayed variant defers *release* by a configured
//! dwell so an actuator cannot re-engage right after a run-cycle ended.
//!
//! Time is a caller-supplied monotonic millisecond timestamp on every call
//! that needs it — the locks hold no clock.

use log::{debug, info};

// ───────────────────────────────────────────────────────────────
// Instant interlock
// ───────────────────────────────────────────────────────────────

/// The basic gate: engage and release both take effect immediately.
///
/// Starts released.
#[derive(Debug)]
pub struct Interlock {
    label: &'static str,
    engaged: bool,
}

impl Interlock {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            engaged: false,
        }
    }

    /// Engage the gate.  Idempotent.
    pub fn engage(&mut self) {
        if !self.engaged {
            info!("{}: interlock engaged", self.label);
        }
        self.engaged = true;
    }

    /// Release the gate.  Idempotent, immediate.
    pub fn release(&mut self) {
        if self.engaged {
            info!("{}: interlock released", self.label);
        }
        self.engaged = false;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}

// ───────────────────────────────────────────────────────────────
// Delayed interlock
// ───────────────────────────────────────────────────────────────

/// A gate whose release is deferred by a minimum dwell time.
///
/// A release request while engaged only records the request timestamp; the
/// gate keeps reporting engaged until `delay_ms` has elapsed since the
/// *first* pending request.  Engaging cancels any pending release.
#[derive(Debug)]
pub struct DelayedInterlock {
    label: &'static str,
    engaged: bool,
    delay_ms: u64,
    pending_since: Option<u64>,
}

impl DelayedInterlock {
    pub fn new(label: &'static str, delay_ms: u64) -> Self {
        Self {
            label,
            engaged: false,
            delay_ms,
            pending_since: None,
        }
    }

    /// Engage immediately and cancel any pending release.  Idempotent.
    pub fn engage(&mut self) {
        if !self.engaged {
            info!("{}: interlock engaged (dwell {} ms)", self.label, self.delay_ms);
        }
        self.engaged = true;
        self.pending_since = None;
    }

    /// Request a release.  No-op when already released.  When engaged, the
    /// first request starts the dwell timer; repeat requests do not restart
    /// it.
    pub fn release(&mut self, now_ms: u64) {
        if !self.engaged {
            return;
        }
        if self.pending_since.is_none() {
            debug!("{}: release requested at {} ms", self.label, now_ms);
            self.pending_since = Some(now_ms);
        }
    }

    /// Whether the gate is engaged at `now_ms`.
    ///
    /// This query has an observable side effect: when a pending release
    /// exists and the dwell has elapsed (`now_ms - requested >= delay_ms`),
    /// the transition to released is realised *here*, lazily, the first
    /// time it is observed.  The poll cadence guarantees it is observed
    /// every cycle.
    pub fn is_engaged(&mut self, now_ms: u64) -> bool {
        if self.engaged {
            if let Some(requested) = self.pending_since {
                if now_ms.saturating_sub(requested) >= self.delay_ms {
                    info!(
                        "{}: interlock released after {} ms dwell",
                        self.label, self.delay_ms
                    );
                    self.engaged = false;
                    self.pending_since = None;
                }
            }
        }
        self.engaged
    }
}

// ───────────────────────────────────────────────────────────────
// Shared dispatch
// ───────────────────────────────────────────────────────────────

/// Closed set of interlock variants, so a channel can be wired with either
/// at startup without generics leaking into the controllers.
#[derive(Debug)]
pub enum SharedInterlock {
    Instant(Interlock),
    Delayed(DelayedInterlock),
}

impl SharedInterlock {
    pub fn engage(&mut self) {
        match self {
            Self::Instant(l) => l.engage(),
            Self::Delayed(l) => l.engage(),
        }
    }

    /// Request release.  Immediate for the instant variant; starts the
    /// dwell timer for the delayed one.
    pub fn release(&mut self, now_ms: u64) {
        match self {
            Self::Instant(l) => l.release(),
            Self::Delayed(l) => l.release(now_ms),
        }
    }

    pub fn is_engaged(&mut self, now_ms: u64) -> bool {
        match self {
            Self::Instant(l) => l.is_engaged(),
            Self::Delayed(l) => l.is_engaged(now_ms),
        }
    }
}
