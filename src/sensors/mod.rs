//! Sensor subsystem — the DHT22 driver and the aggregating hub.
//!
//! [`ClimateSensors`] owns the physical device and produces one
//! [`ClimateSample`] per poll cycle.  A single DHT22 transaction services
//! both logical sensor roles (temperature and humidity), so the hub is
//! where one physical read fans out to two consumers.

pub mod dht22;

use log::warn;

use crate::app::ports::ClimateSample;
use dht22::Dht22;

/// Aggregates the climate sensors behind one sample-per-cycle call.
pub struct ClimateSensors {
    dht: Dht22,
}

impl ClimateSensors {
    pub fn new(dht: Dht22) -> Self {
        Self { dht }
    }

    /// Perform one sensor transaction and fan it out to both roles.
    ///
    /// A failed read is logged here once and surfaced to both roles; the
    /// controllers retain their last good values — a flaky sensor must
    /// not crash or perturb the control loop.
    pub fn sample(&mut self, now_ms: u64) -> ClimateSample {
        match self.dht.read(now_ms) {
            Ok(reading) => ClimateSample {
                temperature_c: Ok(reading.temperature_c),
                humidity_pct: Ok(reading.humidity_pct),
            },
            Err(e) => {
                warn!("DHT22 read failed ({}) — retaining last good values", e);
                ClimateSample {
                    temperature_c: Err(e),
                    humidity_pct: Err(e),
                }
            }
        }
    }
}
