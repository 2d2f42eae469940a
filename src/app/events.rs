//! Outbound application events.
//!
//! The [`ClimateService`](super::service::ClimateService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to serial, feed a
//! display, record in a test.

use crate::error::SensorError;

use super::ports::{ActuatorId, InterlockChannel, SensorRole};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.
    Started,

    /// Per-cycle telemetry snapshot.
    Telemetry(TelemetryData),

    /// A controller changed its commanded actuator state.
    ActuatorSwitched { actuator: ActuatorId, on: bool },

    /// A logical sensor role failed to produce a reading this cycle.
    /// The last good value was retained; no actuator changed.
    SensorFault { role: SensorRole, error: SensorError },

    /// A controller finished its run-cycle and armed the shared gate.
    InterlockEngaged { channel: InterlockChannel },
}

/// A point-in-time snapshot suitable for logging or display.
///
/// The readings are the cached values (`None` before the first good
/// sample), not fresh sensor reads.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub heater_on: bool,
    pub cooler_on: bool,
    pub humidifier_on: bool,
    pub de_humidifier_on: bool,
    pub temperature_lock_engaged: bool,
    pub humidity_lock_engaged: bool,
    pub poll_count: u64,
}
