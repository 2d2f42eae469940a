//! Property tests for the control-layer data structures.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use climabox::app::ports::{ActuatorPort, ClimateSample, SensorPort};
use climabox::app::service::ClimateService;
use climabox::config::SystemConfig;
use climabox::control::interlock::DelayedInterlock;
use climabox::control::range::Range;
use proptest::prelude::*;

// ── Range ─────────────────────────────────────────────────────

proptest! {
    /// `contains` is exactly the closed-interval predicate for any finite
    /// band and probe value.
    #[test]
    fn range_matches_closed_interval(
        a in -1000.0f32..1000.0,
        b in -1000.0f32..1000.0,
        value in -2000.0f32..2000.0,
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = Range::new(min, max).unwrap();
        prop_assert_eq!(range.contains(value), value >= min && value <= max);
    }

    /// NaN is never inside any band.
    #[test]
    fn nan_is_never_in_range(
        a in -1000.0f32..1000.0,
        b in -1000.0f32..1000.0,
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let range = Range::new(min, max).unwrap();
        prop_assert!(!range.contains(f32::NAN));
    }
}

// ── Delayed interlock ─────────────────────────────────────────

proptest! {
    /// The dwell is exact: engaged strictly before `delay_ms` has elapsed
    /// since the first release request, open at and after it.
    #[test]
    fn dwell_boundary_is_exact(
        delay_ms in 1u64..600_000,
        requested_at in 0u64..1_000_000,
    ) {
        let mut lock = DelayedInterlock::new("lock", delay_ms);
        lock.engage();
        lock.release(requested_at);

        if delay_ms > 1 {
            prop_assert!(lock.is_engaged(requested_at + delay_ms - 1));
        }
        prop_assert!(!lock.is_engaged(requested_at + delay_ms));
        prop_assert!(!lock.is_engaged(requested_at + delay_ms + 1));
    }

    /// Repeated release requests never restart the dwell timer.
    #[test]
    fn repeated_release_does_not_extend_dwell(
        delay_ms in 2u64..600_000,
        requested_at in 0u64..1_000_000,
        retries in 1u64..20,
    ) {
        let mut lock = DelayedInterlock::new("lock", delay_ms);
        lock.engage();
        lock.release(requested_at);
        for i in 1..=retries {
            // later requests landing inside the dwell window
            lock.release(requested_at + i * (delay_ms - 1) / retries);
        }
        prop_assert!(!lock.is_engaged(requested_at + delay_ms));
    }
}

// ── Service under arbitrary readings ──────────────────────────

struct ScriptedHw {
    sample: ClimateSample,
    heater_on: bool,
    cooler_on: bool,
}

impl SensorPort for ScriptedHw {
    fn sample(&mut self, _now_ms: u64) -> ClimateSample {
        self.sample
    }
}

impl ActuatorPort for ScriptedHw {
    fn set_actuator(&mut self, id: climabox::app::ports::ActuatorId, on: bool) {
        use climabox::app::ports::ActuatorId;
        match id {
            ActuatorId::Heater => self.heater_on = on,
            ActuatorId::Cooler => self.cooler_on = on,
            _ => {}
        }
    }

    fn all_off(&mut self) {
        self.heater_on = false;
        self.cooler_on = false;
    }
}

proptest! {
    /// Arbitrary reading sequences never panic the service, never leave
    /// heater and cooler on together (their bands are disjoint), and any
    /// actuator left ON has its last reading inside its band.
    #[test]
    fn service_invariants_hold_for_arbitrary_readings(
        readings in proptest::collection::vec(
            proptest::option::of(-50.0f32..120.0), 1..80
        ),
    ) {
        let config = SystemConfig::default();
        let mut service = ClimateService::new(&config).unwrap();
        let mut hw = ScriptedHw {
            sample: ClimateSample {
                temperature_c: Err(climabox::error::SensorError::NotReady),
                humidity_pct: Ok(50.0),
            },
            heater_on: false,
            cooler_on: false,
        };
        let mut sink = NullSink;

        let mut now_ms = 0u64;
        let mut last_temp: Option<f32> = None;
        for reading in readings {
            hw.sample.temperature_c = match reading {
                Some(v) => {
                    last_temp = Some(v);
                    Ok(v)
                }
                None => Err(climabox::error::SensorError::Timeout),
            };
            service.poll(&mut hw, now_ms, &mut sink);

            let t = service.build_telemetry();
            prop_assert!(
                !(t.heater_on && t.cooler_on),
                "heater and cooler bands are disjoint"
            );
            if let Some(v) = last_temp {
                if t.heater_on {
                    prop_assert!(config.heater_band.min <= v && v <= config.heater_band.max);
                }
                if t.cooler_on {
                    prop_assert!(config.cooler_band.min <= v && v <= config.cooler_band.max);
                }
            }
            now_ms += u64::from(config.poll_interval_ms);
        }
    }
}

struct NullSink;

impl climabox::app::ports::EventSink for NullSink {
    fn emit(&mut self, _event: &climabox::app::events::AppEvent) {}
}
