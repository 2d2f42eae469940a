//! ClimaBox Firmware — Main Entry Point
//!
//! Hexagonal architecture over a fixed-cadence poll loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter    LogEventSink   NvsAdapter   Clock    │
//! │  (Sensor+Actuator)  (EventSink)    (ConfigPort) (time)   │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ──────────────        │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          ClimateService (pure logic)           │      │
//! │  │  heater · cooler · humidifier · de-humidifier  │      │
//! │  │      temperature lock   ·   humidity lock      │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  PollGate (cadence) · Watchdog (loop liveness)           │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;
mod scheduler;

pub mod app;
mod adapters;
mod control;
mod drivers;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::MonotonicClock;
use app::events::AppEvent;
use app::ports::{ConfigPort, EventSink};
use app::service::ClimateService;
use config::SystemConfig;
use drivers::relay::Relay;
use scheduler::PollGate;
use sensors::dht22::Dht22;
use sensors::ClimateSensors;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ClimaBox v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = drivers::watchdog::Watchdog::new();

    // ── 3. Load and validate config (fail fast on bad bands) ──
    let config = match NvsAdapter::new() {
        Ok(nvs) => match nvs.load() {
            Ok(cfg) => {
                info!("Config loaded from NVS");
                cfg
            }
            Err(e) => {
                warn!("NVS config load failed ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS init failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    config.validate()?;

    // ── 4. Construct adapters ─────────────────────────────────
    let sensors = ClimateSensors::new(Dht22::new(pins::DHT_GPIO));
    let mut hw = HardwareAdapter::new(
        sensors,
        Relay::new(pins::HEATER_GPIO, "heater"),
        Relay::new(pins::COOLER_GPIO, "cooler"),
        Relay::new(pins::HUMIDIFIER_GPIO, "humidifier"),
        Relay::new(pins::DE_HUMIDIFIER_GPIO, "de-humidifier"),
    );
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 5. Construct the application service ──────────────────
    let mut service = ClimateService::new(&config)?;
    service.start(&mut sink);

    info!(
        "System ready. Polling every {} ms (temperature lock dwell {} ms).",
        config.poll_interval_ms, config.temperature_lock_delay_ms
    );

    // ── 6. Poll loop ──────────────────────────────────────────
    let mut gate = PollGate::new(u64::from(config.poll_interval_ms));

    loop {
        watchdog.feed();

        let now_ms = clock.uptime_ms();
        if gate.should_poll(now_ms) {
            service.poll(&mut hw, now_ms, &mut sink);
            sink.emit(&AppEvent::Telemetry(service.build_telemetry()));
        }

        // Sleep well below the cadence so the gate stays responsive and
        // the watchdog is fed regularly.
        std::thread::sleep(std::time::Duration::from_millis(250));
    }
}
