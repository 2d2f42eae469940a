//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! This is the system's whole reporting surface: one telemetry line per
//! poll cycle plus transition events.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_reading(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "--".to_string(),
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "off" }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | T={}\u{00b0}C H={}% | heater={} cooler={} humidifier={} \
                     de-humidifier={} | locks: T={} H={} | cycle={}",
                    fmt_reading(t.temperature_c),
                    fmt_reading(t.humidity_pct),
                    on_off(t.heater_on),
                    on_off(t.cooler_on),
                    on_off(t.humidifier_on),
                    on_off(t.de_humidifier_on),
                    if t.temperature_lock_engaged { "engaged" } else { "open" },
                    if t.humidity_lock_engaged { "engaged" } else { "open" },
                    t.poll_count,
                );
            }
            AppEvent::ActuatorSwitched { actuator, on } => {
                info!("ACT | {:?} -> {}", actuator, on_off(*on));
            }
            AppEvent::SensorFault { role, error } => {
                warn!("FAULT | {:?} sensor: {}", role, error);
            }
            AppEvent::InterlockEngaged { channel } => {
                info!("LOCK | {:?} channel engaged", channel);
            }
            AppEvent::Started => {
                info!("START | climate control active");
            }
        }
    }
}
