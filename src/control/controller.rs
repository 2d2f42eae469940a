//! Bang-bang climate controller.
//!
//! One controller per actuator.  Each poll is a stateless decision over the
//! current reading, the controller's band and the shared interlock — the
//! only carried state is the cached last reading and the last commanded
//! actuator state (so hardware writes are issued on change only).

use log::info;

use super::interlock::SharedInterlock;
use super::range::Range;
use crate::error::SensorError;

/// What one poll decided.  The caller (the application service) applies the
/// command to the actuator port and turns the flags into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// `Some(on)` when the commanded actuator state changed this cycle.
    pub command: Option<bool>,
    /// The controller engaged the shared interlock (its run-cycle ended).
    pub engaged_interlock: bool,
    /// The reading failed; cached value and actuator state were held.
    pub sensor_fault: bool,
}

impl PollOutcome {
    const HOLD: Self = Self {
        command: None,
        engaged_interlock: false,
        sensor_fault: true,
    };
}

/// On/off controller for a single actuator.
///
/// The decision rule: the actuator is ON exactly when the reading is inside
/// the band AND the shared interlock is released.  A commanded ON→OFF
/// transition engages the interlock — a finished run-cycle is what requires
/// the dwell before the paired actuator may take over.  While the reading
/// is in-band the controller requests a release each poll (idempotent), so
/// a delayed interlock's dwell runs from the moment conditions return
/// in-band for that channel.
pub struct ClimateController {
    label: &'static str,
    band: Range,
    last_value: Option<f32>,
    commanded_on: bool,
}

impl ClimateController {
    pub fn new(label: &'static str, band: Range) -> Self {
        Self {
            label,
            band,
            last_value: None,
            commanded_on: false,
        }
    }

    /// Run one poll cycle against a fresh reading.
    ///
    /// A failed reading is swallowed here: the cached value, commanded
    /// state and interlock are all left untouched, and the next cadence
    /// tick is the retry.
    pub fn poll(
        &mut self,
        reading: Result<f32, SensorError>,
        interlock: &mut SharedInterlock,
        now_ms: u64,
    ) -> PollOutcome {
        let Ok(value) = reading else {
            return PollOutcome::HOLD;
        };
        self.last_value = Some(value);

        let in_band = self.band.contains(value);
        if in_band {
            interlock.release(now_ms);
        }
        let want_on = in_band && !interlock.is_engaged(now_ms);

        if want_on == self.commanded_on {
            return PollOutcome {
                command: None,
                engaged_interlock: false,
                sensor_fault: false,
            };
        }

        let mut engaged_interlock = false;
        if !want_on {
            // Run-cycle ended: arm the shared gate so the paired actuator
            // cannot take over inside the dwell window.
            interlock.engage();
            engaged_interlock = true;
        }
        self.commanded_on = want_on;
        info!("{}: {}", self.label, if want_on { "ON" } else { "OFF" });

        PollOutcome {
            command: Some(want_on),
            engaged_interlock,
            sensor_fault: false,
        }
    }

    /// The last cached reading; `None` before the first successful poll.
    pub fn current_value(&self) -> Option<f32> {
        self.last_value
    }

    /// The last commanded actuator state.
    pub fn is_on(&self) -> bool {
        self.commanded_on
    }

    pub fn band(&self) -> Range {
        self.band
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::interlock::{DelayedInterlock, Interlock};

    fn heater() -> ClimateController {
        ClimateController::new("heater", Range::new(0.0, 30.0).unwrap())
    }

    fn instant_lock() -> SharedInterlock {
        SharedInterlock::Instant(Interlock::new("test"))
    }

    #[test]
    fn in_band_and_released_turns_on() {
        let mut ctl = heater();
        let mut lock = instant_lock();
        let out = ctl.poll(Ok(25.0), &mut lock, 0);
        assert_eq!(out.command, Some(true));
        assert!(ctl.is_on());
        assert_eq!(ctl.current_value(), Some(25.0));
    }

    #[test]
    fn out_of_band_after_run_turns_off_and_engages() {
        let mut ctl = heater();
        let mut lock = instant_lock();
        ctl.poll(Ok(25.0), &mut lock, 0);
        let out = ctl.poll(Ok(31.0), &mut lock, 6_000);
        assert_eq!(out.command, Some(false));
        assert!(out.engaged_interlock);
        assert!(lock.is_engaged(6_000));
    }

    #[test]
    fn out_of_band_without_prior_run_leaves_interlock_alone() {
        let mut ctl = heater();
        let mut lock = instant_lock();
        let out = ctl.poll(Ok(31.0), &mut lock, 0);
        assert_eq!(out.command, None, "already off, no redundant command");
        assert!(!out.engaged_interlock);
        assert!(!lock.is_engaged(0));
    }

    #[test]
    fn engaged_interlock_blocks_in_band_reading() {
        let mut ctl = heater();
        let mut lock = SharedInterlock::Delayed(DelayedInterlock::new("test", 120_000));
        lock.engage();
        let out = ctl.poll(Ok(25.0), &mut lock, 1_000);
        assert_eq!(out.command, None);
        assert!(!ctl.is_on(), "in-band but gated");
        // The in-band poll requested release; dwell runs from t=1000.
        assert!(lock.is_engaged(120_999));
        assert!(!lock.is_engaged(121_000));
    }

    #[test]
    fn sensor_fault_holds_value_and_state() {
        let mut ctl = heater();
        let mut lock = instant_lock();
        ctl.poll(Ok(25.0), &mut lock, 0);
        let out = ctl.poll(Err(SensorError::ChecksumMismatch), &mut lock, 6_000);
        assert!(out.sensor_fault);
        assert_eq!(out.command, None);
        assert_eq!(ctl.current_value(), Some(25.0), "cached value retained");
        assert!(ctl.is_on(), "actuator state retained");
    }

    #[test]
    fn fault_before_first_reading_leaves_value_unset() {
        let mut ctl = heater();
        let mut lock = instant_lock();
        let out = ctl.poll(Err(SensorError::NotReady), &mut lock, 0);
        assert!(out.sensor_fault);
        assert_eq!(ctl.current_value(), None);
        assert!(!ctl.is_on());
    }

    #[test]
    fn steady_state_issues_no_redundant_commands() {
        let mut ctl = heater();
        let mut lock = instant_lock();
        assert_eq!(ctl.poll(Ok(25.0), &mut lock, 0).command, Some(true));
        assert_eq!(ctl.poll(Ok(26.0), &mut lock, 6_000).command, None);
        assert_eq!(ctl.poll(Ok(24.0), &mut lock, 12_000).command, None);
    }
}
