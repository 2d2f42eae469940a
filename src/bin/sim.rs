//! Host-side simulation of the ClimaBox control loop.
//!
//! Drives the real [`ClimateService`] with synthetic temperature/humidity
//! drift on an accelerated clock (one poll interval per loop iteration,
//! no sleeping), demonstrating the heater/cooler handover and the
//! temperature interlock's dwell lockout without hardware.
//!
//! Run with `cargo run --bin sim`.

#[cfg(not(target_os = "espidf"))]
fn main() {
    sim::run();
}

// The simulation drives the cfg-gated host sensor stubs; on the device
// target this binary compiles to an empty stub and is never flashed.
#[cfg(target_os = "espidf")]
fn main() {}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use climabox::adapters::hardware::HardwareAdapter;
    use climabox::app::events::AppEvent;
    use climabox::app::ports::{EventSink, SensorRole};
    use climabox::app::service::ClimateService;
    use climabox::config::SystemConfig;
    use climabox::drivers::relay::Relay;
    use climabox::pins;
    use climabox::scheduler::PollGate;
    use climabox::sensors::dht22::{self, Dht22};
    use climabox::sensors::ClimateSensors;

    /// Sink that prints transition events; the sim is its own presenter.
    struct ConsoleSink;

    impl EventSink for ConsoleSink {
        fn emit(&mut self, event: &AppEvent) {
            match event {
                AppEvent::ActuatorSwitched { actuator, on } => {
                    println!("      {:?} -> {}", actuator, if *on { "ON" } else { "off" });
                }
                AppEvent::InterlockEngaged { channel } => {
                    println!("      {:?} interlock engaged", channel);
                }
                AppEvent::SensorFault { role, error } => {
                    println!("      {:?} sensor fault: {}", role, error);
                }
                _ => {}
            }
        }
    }

    /// Piecewise scenario: warm up past the cooler band, cool back down,
    /// and watch the heater wait out the 120 s dwell.
    fn scenario_temperature(t_ms: u64) -> f32 {
        let t_s = t_ms as f32 / 1000.0;
        if t_s < 60.0 {
            // heating phase: 25 °C rising to 33 °C
            25.0 + t_s * (8.0 / 60.0)
        } else if t_s < 180.0 {
            // cooler running: drift back down to 28 °C
            33.0 - (t_s - 60.0) * (5.0 / 120.0)
        } else {
            // settle inside the heater band
            28.0 - ((t_s - 180.0) * 0.02).min(3.0)
        }
    }

    fn scenario_humidity(t_ms: u64) -> f32 {
        let t_s = t_ms as f32 / 1000.0;
        (55.0 + (t_s / 30.0).sin() * 25.0).clamp(0.0, 100.0)
    }

    pub fn run() {
        let config = SystemConfig::default();
        config.validate().expect("default config must validate");

        let sensors = ClimateSensors::new(Dht22::new(pins::DHT_GPIO));
        let mut hw = HardwareAdapter::new(
            sensors,
            Relay::new(pins::HEATER_GPIO, "heater"),
            Relay::new(pins::COOLER_GPIO, "cooler"),
            Relay::new(pins::HUMIDIFIER_GPIO, "humidifier"),
            Relay::new(pins::DE_HUMIDIFIER_GPIO, "de-humidifier"),
        );
        let mut sink = ConsoleSink;
        let mut service = ClimateService::new(&config).expect("service construction");
        service.start(&mut sink);

        let interval = u64::from(config.poll_interval_ms);
        let mut gate = PollGate::new(interval);
        let cycles = 60; // 6 simulated minutes at the 6 s cadence

        println!(
            "ClimaBox sim: {} cycles at {} ms cadence, temperature dwell {} ms",
            cycles, interval, config.temperature_lock_delay_ms
        );

        let mut now_ms = 0u64;
        for _ in 0..cycles {
            dht22::sim_set_temperature(scenario_temperature(now_ms));
            dht22::sim_set_humidity(scenario_humidity(now_ms));

            if gate.should_poll(now_ms) {
                service.poll(&mut hw, now_ms, &mut sink);
                let t = service.build_telemetry();
                println!(
                    "[{:>7} ms] T={:>5} H={:>5} | heater={} cooler={} | \
                     T-lock={} H-lock={}",
                    now_ms,
                    t.temperature_c
                        .map_or_else(|| "--".into(), |v| format!("{v:.1}")),
                    t.humidity_pct
                        .map_or_else(|| "--".into(), |v| format!("{v:.1}")),
                    if t.heater_on { "ON " } else { "off" },
                    if t.cooler_on { "ON " } else { "off" },
                    if t.temperature_lock_engaged { "engaged" } else { "open" },
                    if t.humidity_lock_engaged { "engaged" } else { "open" },
                );
            }
            now_ms += interval;
        }

        println!(
            "done. final readings: T={:?} H={:?}",
            service.current(SensorRole::Temperature),
            service.current(SensorRole::Humidity)
        );
    }
}
