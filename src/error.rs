//! Unified error types for the ClimaBox firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping error
//! handling in the entry points uniform. All variants are `Copy` so they
//! can be passed through the control loop without allocation.
//!
//! Sensor failures are deliberately *not* fatal anywhere in the system:
//! the poll cadence itself is the retry mechanism. Configuration errors
//! are the opposite — they are rejected at startup and refuse boot.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// Configuration is invalid (fail fast at startup).
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Why a sensor reading could not be produced this cycle.
///
/// Controllers recover from all of these identically: retain the last good
/// value, leave the actuator untouched, try again next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The device did not answer the start-of-frame handshake.
    NoResponse,
    /// A bus level did not change within the protocol timeout.
    Timeout,
    /// The 40-bit frame arrived but its checksum did not match.
    ChecksumMismatch,
    /// The device needs more time between samples (DHT22: 2 s minimum).
    NotReady,
    /// The decoded value is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response from device"),
            Self::Timeout => write!(f, "bus timeout"),
            Self::ChecksumMismatch => write!(f, "frame checksum mismatch"),
            Self::NotReady => write!(f, "device not ready"),
            Self::OutOfRange => write!(f, "reading out of plausible range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
