//! Application service — the hexagonal core.
//!
//! [`ClimateService`] is the composed application state: it owns the four
//! controllers and the two shared interlocks, and exposes a clean,
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │        ClimateService        │
//! ActuatorPort ◀──│  4 × controller · 2 × lock   │
//!                 └─────────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::control::controller::ClimateController;
use crate::control::interlock::{DelayedInterlock, Interlock, SharedInterlock};
use crate::control::range::Range;
use crate::error::{Result, SensorError};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorId, ActuatorPort, EventSink, InterlockChannel, SensorPort, SensorRole};

// ───────────────────────────────────────────────────────────────
// ClimateService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the read → decide → act cycle across all four controllers.
pub struct ClimateService {
    heater: ClimateController,
    cooler: ClimateController,
    humidifier: ClimateController,
    de_humidifier: ClimateController,
    temperature_lock: SharedInterlock,
    humidity_lock: SharedInterlock,
    /// Lock states as observed at the end of the last poll, cached so
    /// `build_telemetry` can stay a `&self` query.
    temperature_lock_engaged: bool,
    humidity_lock_engaged: bool,
    poll_count: u64,
}

impl ClimateService {
    /// Construct the service from a validated configuration.
    ///
    /// An inverted band still fails here (fail fast) even if the caller
    /// skipped [`SystemConfig::validate`].
    pub fn new(config: &SystemConfig) -> Result<Self> {
        Ok(Self {
            heater: ClimateController::new(
                "heater",
                Range::new(config.heater_band.min, config.heater_band.max)?,
            ),
            cooler: ClimateController::new(
                "cooler",
                Range::new(config.cooler_band.min, config.cooler_band.max)?,
            ),
            humidifier: ClimateController::new(
                "humidifier",
                Range::new(config.humidifier_band.min, config.humidifier_band.max)?,
            ),
            de_humidifier: ClimateController::new(
                "de-humidifier",
                Range::new(config.de_humidifier_band.min, config.de_humidifier_band.max)?,
            ),
            temperature_lock: SharedInterlock::Delayed(DelayedInterlock::new(
                "temperature",
                u64::from(config.temperature_lock_delay_ms),
            )),
            humidity_lock: SharedInterlock::Instant(Interlock::new("humidity")),
            temperature_lock_engaged: false,
            humidity_lock_engaged: false,
            poll_count: 0,
        })
    }

    /// Announce startup through the sink.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!("ClimateService started");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full poll cycle: sample → decide per controller → apply.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    ///
    /// Controllers run in a fixed order (heater, cooler, humidifier,
    /// de-humidifier) so that an interlock engaged early in the cycle is
    /// deterministically observed by its channel partner in the *same*
    /// cycle.
    pub fn poll(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        now_ms: u64,
        sink: &mut impl EventSink,
    ) {
        self.poll_count += 1;

        // 1. One physical transaction, fanned out to both roles.
        let sample = hw.sample(now_ms);
        if let Err(error) = sample.temperature_c {
            sink.emit(&AppEvent::SensorFault {
                role: SensorRole::Temperature,
                error,
            });
        }
        if let Err(error) = sample.humidity_pct {
            sink.emit(&AppEvent::SensorFault {
                role: SensorRole::Humidity,
                error,
            });
        }

        // 2. Decide and apply, in declared order.
        Self::run_controller(
            &mut self.heater,
            ActuatorId::Heater,
            sample.temperature_c,
            &mut self.temperature_lock,
            InterlockChannel::Temperature,
            now_ms,
            hw,
            sink,
        );
        Self::run_controller(
            &mut self.cooler,
            ActuatorId::Cooler,
            sample.temperature_c,
            &mut self.temperature_lock,
            InterlockChannel::Temperature,
            now_ms,
            hw,
            sink,
        );
        Self::run_controller(
            &mut self.humidifier,
            ActuatorId::Humidifier,
            sample.humidity_pct,
            &mut self.humidity_lock,
            InterlockChannel::Humidity,
            now_ms,
            hw,
            sink,
        );
        Self::run_controller(
            &mut self.de_humidifier,
            ActuatorId::DeHumidifier,
            sample.humidity_pct,
            &mut self.humidity_lock,
            InterlockChannel::Humidity,
            now_ms,
            hw,
            sink,
        );

        // 3. Snapshot the lock states for telemetry queries.  Observing a
        // delayed lock here may realise its lazy release one query early,
        // which is harmless — the same check happens next cycle anyway.
        self.temperature_lock_engaged = self.temperature_lock.is_engaged(now_ms);
        self.humidity_lock_engaged = self.humidity_lock.is_engaged(now_ms);
    }

    #[allow(clippy::too_many_arguments)]
    fn run_controller(
        ctl: &mut ClimateController,
        actuator: ActuatorId,
        reading: core::result::Result<f32, SensorError>,
        interlock: &mut SharedInterlock,
        channel: InterlockChannel,
        now_ms: u64,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let outcome = ctl.poll(reading, interlock, now_ms);
        if let Some(on) = outcome.command {
            hw.set_actuator(actuator, on);
            sink.emit(&AppEvent::ActuatorSwitched { actuator, on });
        }
        if outcome.engaged_interlock {
            sink.emit(&AppEvent::InterlockEngaged { channel });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// The cached reading for a sensor role; `None` before the first
    /// successful poll.  Not a fresh read.
    pub fn current(&self, role: SensorRole) -> Option<f32> {
        match role {
            SensorRole::Temperature => self.heater.current_value(),
            SensorRole::Humidity => self.humidifier.current_value(),
        }
    }

    /// Build a telemetry snapshot from the cached cycle state.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            temperature_c: self.current(SensorRole::Temperature),
            humidity_pct: self.current(SensorRole::Humidity),
            heater_on: self.heater.is_on(),
            cooler_on: self.cooler.is_on(),
            humidifier_on: self.humidifier.is_on(),
            de_humidifier_on: self.de_humidifier.is_on(),
            temperature_lock_engaged: self.temperature_lock_engaged,
            humidity_lock_engaged: self.humidity_lock_engaged,
            poll_count: self.poll_count,
        }
    }

    /// Total poll cycles executed since startup.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }
}
