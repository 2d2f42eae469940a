//! Integration tests: ClimateService → controllers → actuator port.
//!
//! Drives the real service through a recording mock hardware adapter with
//! scripted timestamps, covering the shared-interlock coupling and the
//! 120 s anti-short-cycle lockout end to end.

use climabox::app::events::AppEvent;
use climabox::app::ports::{
    ActuatorId, ActuatorPort, ClimateSample, EventSink, InterlockChannel, SensorPort, SensorRole,
};
use climabox::app::service::ClimateService;
use climabox::config::SystemConfig;
use climabox::error::SensorError;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HwCall {
    Set(ActuatorId, bool),
    AllOff,
}

struct MockHw {
    next: ClimateSample,
    calls: Vec<HwCall>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            next: ok_sample(25.0, 50.0),
            calls: Vec::new(),
        }
    }

    fn set(&mut self, sample: ClimateSample) {
        self.next = sample;
    }
}

impl SensorPort for MockHw {
    fn sample(&mut self, _now_ms: u64) -> ClimateSample {
        self.next
    }
}

impl ActuatorPort for MockHw {
    fn set_actuator(&mut self, id: ActuatorId, on: bool) {
        self.calls.push(HwCall::Set(id, on));
    }

    fn all_off(&mut self) {
        self.calls.push(HwCall::AllOff);
    }
}

struct RecSink {
    events: Vec<AppEvent>,
}

impl RecSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for RecSink {
    fn emit(&mut self, e: &AppEvent) {
        self.events.push(e.clone());
    }
}

fn ok_sample(temperature_c: f32, humidity_pct: f32) -> ClimateSample {
    ClimateSample {
        temperature_c: Ok(temperature_c),
        humidity_pct: Ok(humidity_pct),
    }
}

fn failed_sample(e: SensorError) -> ClimateSample {
    ClimateSample {
        temperature_c: Err(e),
        humidity_pct: Err(e),
    }
}

/// Default deployment: heater [0, 30] °C, cooler [32, 100] °C, humidifier
/// [0, 69.9] %RH, de-humidifier [75, 100] %RH, temperature dwell 120 s.
fn make_service() -> (ClimateService, MockHw, RecSink) {
    let mut service = ClimateService::new(&SystemConfig::default()).unwrap();
    let hw = MockHw::new();
    let mut sink = RecSink::new();
    service.start(&mut sink);
    (service, hw, sink)
}

// ── Basic decision rule ───────────────────────────────────────

#[test]
fn in_range_reading_turns_actuators_on() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.set(ok_sample(25.0, 50.0)); // heater band, humidifier band
    service.poll(&mut hw, 0, &mut sink);

    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::Heater, true)));
    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::Humidifier, true)));
    assert!(
        !hw.calls.iter().any(|c| matches!(c, HwCall::Set(ActuatorId::Cooler, true))),
        "cooler band does not match 25.0"
    );

    let t = service.build_telemetry();
    assert!(t.heater_on && t.humidifier_on);
    assert!(!t.cooler_on && !t.de_humidifier_on);
}

#[test]
fn leaving_the_band_turns_off_and_engages_the_lock() {
    let (mut service, mut hw, mut sink) = make_service();
    service.poll(&mut hw, 0, &mut sink); // heater ON at 25.0

    hw.set(ok_sample(31.0, 50.0)); // outside both temperature bands
    service.poll(&mut hw, 6_000, &mut sink);

    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::Heater, false)));
    assert!(sink.events.contains(&AppEvent::InterlockEngaged {
        channel: InterlockChannel::Temperature
    }));
    assert!(service.build_telemetry().temperature_lock_engaged);
}

#[test]
fn no_redundant_commands_in_steady_state() {
    let (mut service, mut hw, mut sink) = make_service();
    service.poll(&mut hw, 0, &mut sink);
    let after_first = hw.calls.len();

    service.poll(&mut hw, 6_000, &mut sink);
    service.poll(&mut hw, 12_000, &mut sink);
    assert_eq!(
        hw.calls.len(),
        after_first,
        "identical readings must not re-command the relays"
    );
}

// ── Sensor failure handling ───────────────────────────────────

#[test]
fn sensor_failure_holds_values_and_actuators() {
    let (mut service, mut hw, mut sink) = make_service();
    service.poll(&mut hw, 0, &mut sink);
    let calls_before = hw.calls.len();

    hw.set(failed_sample(SensorError::ChecksumMismatch));
    service.poll(&mut hw, 6_000, &mut sink);

    assert_eq!(service.current(SensorRole::Temperature), Some(25.0));
    assert_eq!(service.current(SensorRole::Humidity), Some(50.0));
    assert_eq!(hw.calls.len(), calls_before, "no actuator change on a bad read");
    assert!(sink.events.contains(&AppEvent::SensorFault {
        role: SensorRole::Temperature,
        error: SensorError::ChecksumMismatch
    }));
    assert!(sink.events.contains(&AppEvent::SensorFault {
        role: SensorRole::Humidity,
        error: SensorError::ChecksumMismatch
    }));
}

#[test]
fn current_value_is_none_before_first_good_poll() {
    let (mut service, mut hw, mut sink) = make_service();
    assert_eq!(service.current(SensorRole::Temperature), None);

    hw.set(failed_sample(SensorError::NotReady));
    service.poll(&mut hw, 0, &mut sink);
    assert_eq!(
        service.current(SensorRole::Temperature),
        None,
        "a failed first read must not invent a value"
    );
    assert!(hw.calls.is_empty());
}

// ── Shared interlock coupling ─────────────────────────────────

#[test]
fn heater_shutoff_blocks_cooler_in_the_same_cycle() {
    let (mut service, mut hw, mut sink) = make_service();
    service.poll(&mut hw, 0, &mut sink); // heater ON at 25.0

    // 32.0 is inside the cooler band, but the heater's shutoff in this
    // very cycle engages the shared lock before the cooler evaluates.
    hw.set(ok_sample(32.0, 50.0));
    service.poll(&mut hw, 6_000, &mut sink);

    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::Heater, false)));
    assert!(
        !hw.calls.iter().any(|c| matches!(c, HwCall::Set(ActuatorId::Cooler, true))),
        "cooler must observe the lock engaged in the same cycle"
    );
    assert!(!service.build_telemetry().cooler_on);
}

#[test]
fn cooler_engages_only_after_the_dwell_elapses() {
    let (mut service, mut hw, mut sink) = make_service();
    service.poll(&mut hw, 0, &mut sink); // heater ON

    // Heater off + lock engaged; cooler in-band requests release at t=1000.
    hw.set(ok_sample(32.0, 50.0));
    service.poll(&mut hw, 1_000, &mut sink);
    assert!(!service.build_telemetry().cooler_on);

    // One tick before the 120 s dwell expires: still locked out.
    service.poll(&mut hw, 1_000 + 119_999, &mut sink);
    assert!(!service.build_telemetry().cooler_on);
    assert!(service.build_telemetry().temperature_lock_engaged);

    // Past the dwell: the cooler may finally run.
    service.poll(&mut hw, 1_000 + 120_001, &mut sink);
    assert!(service.build_telemetry().cooler_on);
    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::Cooler, true)));
}

#[test]
fn heater_cannot_reengage_before_the_dwell() {
    // The §-scenario from the deployment: 25.0 → 32.0 → 25.0 at
    // t=0, 1000, 121500 ms with a 120 s dwell.
    let (mut service, mut hw, mut sink) = make_service();

    service.poll(&mut hw, 0, &mut sink);
    assert!(service.build_telemetry().heater_on);
    assert!(!service.build_telemetry().temperature_lock_engaged);

    hw.set(ok_sample(32.0, 50.0));
    service.poll(&mut hw, 1_000, &mut sink);
    let t = service.build_telemetry();
    assert!(!t.heater_on);
    assert!(t.temperature_lock_engaged, "heater shutoff armed the lock");

    // Release was requested at t=1000 (cooler in-band); by t=121500 the
    // dwell (120 s) has elapsed and the heater may run again.
    hw.set(ok_sample(25.0, 50.0));
    service.poll(&mut hw, 121_500, &mut sink);
    let t = service.build_telemetry();
    assert!(t.heater_on, "dwell elapsed, heater re-engages");
    assert!(!t.temperature_lock_engaged);
}

#[test]
fn humidity_channel_hands_over_instantly() {
    let (mut service, mut hw, mut sink) = make_service();
    service.poll(&mut hw, 0, &mut sink); // humidifier ON at 50 %RH

    // 80 %RH: humidifier off engages the plain lock, but the instant
    // variant releases within the same cycle, so the de-humidifier runs
    // immediately — only the temperature channel has a dwell.
    hw.set(ok_sample(25.0, 80.0));
    service.poll(&mut hw, 6_000, &mut sink);

    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::Humidifier, false)));
    assert!(hw.calls.contains(&HwCall::Set(ActuatorId::DeHumidifier, true)));
    let t = service.build_telemetry();
    assert!(!t.humidifier_on && t.de_humidifier_on);
    assert!(!t.humidity_lock_engaged);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reflects_cached_readings_and_cycle_count() {
    let (mut service, mut hw, mut sink) = make_service();
    hw.set(ok_sample(22.5, 61.0));
    service.poll(&mut hw, 0, &mut sink);
    service.poll(&mut hw, 6_000, &mut sink);

    let t = service.build_telemetry();
    assert_eq!(t.temperature_c, Some(22.5));
    assert_eq!(t.humidity_pct, Some(61.0));
    assert_eq!(t.poll_count, 2);
}
