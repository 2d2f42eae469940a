//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClimateService (domain)
//! ```
//!
//! Driven adapters (the DHT22 hub, relays, event sinks, NVS) implement
//! these traits.  The [`ClimateService`](super::service::ClimateService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Time is deliberately *not* a port: monotonic millisecond
//! timestamps flow into `poll()` as plain arguments, which keeps every
//! timing test a matter of passing numbers.

use crate::config::SystemConfig;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Vocabulary
// ───────────────────────────────────────────────────────────────

/// Logical sensor roles.  Both are served by one physical DHT22
/// transaction per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorRole {
    Temperature,
    Humidity,
}

/// The four actuator relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorId {
    Heater,
    Cooler,
    Humidifier,
    DeHumidifier,
}

/// The two interlock channels (one shared gate per sensor role).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlockChannel {
    Temperature,
    Humidity,
}

/// One poll cycle's worth of sensor data, per logical role.
///
/// A single physical read services both roles, so both sides fail
/// together in practice — but the contract keeps them independent.
#[derive(Debug, Clone, Copy)]
pub struct ClimateSample {
    pub temperature_c: Result<f32, SensorError>,
    pub humidity_pct: Result<f32, SensorError>,
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per poll cycle.
pub trait SensorPort {
    /// Perform one physical sensor transaction and fan it out to the two
    /// logical roles.
    fn sample(&mut self, now_ms: u64) -> ClimateSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: relay commands are fire-and-forget digital outputs,
/// assumed infallible at this layer.
pub trait ActuatorPort {
    /// Command one relay on or off.  Idempotent.
    fn set_actuator(&mut self, id: ActuatorId, on: bool);

    /// Kill all four relays — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// telemetry uplink, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: startup only)
// ───────────────────────────────────────────────────────────────

/// Loads the system configuration at boot.
///
/// There is deliberately no save path: the configuration is static for
/// the process lifetime and controller state is never persisted.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
