//! One-shot hardware peripheral initialization and GPIO helpers.
//!
//! Configures the relay output pins and the DHT22 data line using raw
//! ESP-IDF sys calls.  Called once from `main()` before the poll loop
//! starts.  The DHT22 bus helpers (direction switching, microsecond
//! delay) live here too so the sensor driver stays free of sys calls.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

// ── Peripheral init ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    let relay_pins = [
        pins::HEATER_GPIO,
        pins::COOLER_GPIO,
        pins::HUMIDIFIER_GPIO,
        pins::DE_HUMIDIFIER_GPIO,
    ];

    for &pin in &relay_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: Called once from main() before the poll loop; single-threaded.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // All actuators off at boot.
        unsafe { gpio_set_level(pin, 0) };
    }

    // DHT22 data line idles as an input with the external pull-up holding
    // the bus high; the driver switches direction per transaction.
    gpio_set_dir(pins::DHT_GPIO, false);

    info!("hw_init: relays + DHT bus configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO helpers ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_peripherals(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access; safe to call
    // from main context on a configured pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

/// Switch a pin between open-drain-style output (`true`) and input with
/// pull-up (`false`).  The DHT22 single-wire protocol needs both on the
/// same line within one transaction.
#[cfg(target_os = "espidf")]
pub fn gpio_set_dir(pin: i32, output: bool) {
    // SAFETY: direction/pull changes on a valid pin from main context only.
    unsafe {
        if output {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
        } else {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
            gpio_set_pull_mode(pin, gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set_dir(_pin: i32, _output: bool) {}

/// Busy-wait for `us` microseconds.  The DHT22 frame is decoded by timing
/// pulse widths, so this must not yield to the scheduler.
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    esp_idf_hal::delay::Ets::delay_us(us);
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}
