//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`ClimateSensors`] hub and the four relay drivers, exposing
//! them through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that hands hardware to the domain.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{ActuatorId, ActuatorPort, ClimateSample, SensorPort};
use crate::drivers::relay::Relay;
use crate::sensors::ClimateSensors;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensors: ClimateSensors,
    heater: Relay,
    cooler: Relay,
    humidifier: Relay,
    de_humidifier: Relay,
}

impl HardwareAdapter {
    pub fn new(
        sensors: ClimateSensors,
        heater: Relay,
        cooler: Relay,
        humidifier: Relay,
        de_humidifier: Relay,
    ) -> Self {
        Self {
            sensors,
            heater,
            cooler,
            humidifier,
            de_humidifier,
        }
    }

    fn relay(&mut self, id: ActuatorId) -> &mut Relay {
        match id {
            ActuatorId::Heater => &mut self.heater,
            ActuatorId::Cooler => &mut self.cooler,
            ActuatorId::Humidifier => &mut self.humidifier,
            ActuatorId::DeHumidifier => &mut self.de_humidifier,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn sample(&mut self, now_ms: u64) -> ClimateSample {
        self.sensors.sample(now_ms)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_actuator(&mut self, id: ActuatorId, on: bool) {
        self.relay(id).set(on);
    }

    fn all_off(&mut self) {
        self.heater.set(false);
        self.cooler.set(false);
        self.humidifier.set(false);
        self.de_humidifier.set(false);
    }
}
