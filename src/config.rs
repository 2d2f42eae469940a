//! System configuration parameters.
//!
//! All tunable parameters for the ClimaBox deployment.  Values are loaded
//! from NVS at boot (postcard blob) and are static for the process
//! lifetime — there is no runtime reconfiguration path.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// An inclusive `[min, max]` threshold band for one actuator.
///
/// The band is the "actuator runs" interval: the heater runs while the
/// temperature is at or below `max`, the cooler while at or above `min`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandConfig {
    pub min: f32,
    pub max: f32,
}

impl BandConfig {
    fn check(&self, what: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::ValidationFailed(what));
        }
        if self.min > self.max {
            return Err(ConfigError::ValidationFailed(what));
        }
        Ok(())
    }
}

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Threshold bands ---
    /// Heater runs while temperature is inside this band (°C).
    pub heater_band: BandConfig,
    /// Cooler runs while temperature is inside this band (°C).
    pub cooler_band: BandConfig,
    /// Humidifier runs while humidity is inside this band (%RH).
    pub humidifier_band: BandConfig,
    /// De-humidifier runs while humidity is inside this band (%RH).
    pub de_humidifier_band: BandConfig,

    // --- Timing ---
    /// Poll cadence for the aggregate control cycle (milliseconds).
    pub poll_interval_ms: u32,
    /// Minimum dwell before the temperature interlock releases after an
    /// actuator run-cycle ends (milliseconds).  Protects the compressor
    /// and heating element from short-cycling.
    pub temperature_lock_delay_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            heater_band: BandConfig { min: 0.0, max: 30.0 },
            cooler_band: BandConfig { min: 32.0, max: 100.0 },
            humidifier_band: BandConfig { min: 0.0, max: 69.9 },
            de_humidifier_band: BandConfig { min: 75.0, max: 100.0 },
            poll_interval_ms: 6_000,
            temperature_lock_delay_ms: 120_000, // 2 min compressor protection
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Called once at boot; a failure here is
    /// fatal — the process refuses to start rather than run with a band
    /// whose `min > max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heater_band.check("heater_band: min must be <= max and finite")?;
        self.cooler_band.check("cooler_band: min must be <= max and finite")?;
        self.humidifier_band
            .check("humidifier_band: min must be <= max and finite")?;
        self.de_humidifier_band
            .check("de_humidifier_band: min must be <= max and finite")?;

        if !(1_000..=300_000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 1000–300000",
            ));
        }
        if !(1_000..=3_600_000).contains(&self.temperature_lock_delay_ms) {
            return Err(ConfigError::ValidationFailed(
                "temperature_lock_delay_ms must be 1000–3600000",
            ));
        }
        Ok(())
    }
}
