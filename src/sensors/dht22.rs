//! DHT22 (AM2302) combined temperature/humidity sensor driver.
//!
//! Single-wire protocol: the host pulls the bus low for >1 ms, the sensor
//! acknowledges with an 80 µs low + 80 µs high pulse, then clocks out a
//! 40-bit frame (16-bit humidity, 16-bit temperature, 8-bit checksum)
//! where bit values are encoded in the width of the high pulse.
//!
//! The datasheet requires at least 2 s between transactions; the driver
//! enforces that and serves the cached frame in between.  Decoded values
//! outside the device's measurable span (−40…80 °C, 0…100 %RH) are
//! rejected as implausible rather than passed to the controllers.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the real bus via hw_init helpers.  The frame is
//! decoded by timing pulse widths, so the read must not be preempted —
//! the poll loop is the only task touching this pin.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

// ── Host simulation hooks ─────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41C8_0000); // 25.0 °C
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_BITS: AtomicU32 = AtomicU32::new(0x4248_0000); // 50.0 %RH
#[cfg(not(target_os = "espidf"))]
static SIM_FAIL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temperature(celsius: f32) {
    SIM_TEMP_BITS.store(celsius.to_bits(), Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_humidity(pct: f32) {
    SIM_HUM_BITS.store(pct.to_bits(), Ordering::Relaxed);
}

/// Make every subsequent read fail with [`SensorError::NoResponse`].
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failure(fail: bool) {
    SIM_FAIL.store(fail, Ordering::Relaxed);
}

// ── Driver ────────────────────────────────────────────────────

/// Minimum spacing between bus transactions per the datasheet.
const MIN_SAMPLE_INTERVAL_MS: u64 = 2_000;

/// Measurable span per the datasheet; anything outside is a garbage frame.
const TEMP_SPAN_C: core::ops::RangeInclusive<f32> = -40.0..=80.0;
const HUM_SPAN_PCT: core::ops::RangeInclusive<f32> = 0.0..=100.0;

/// One decoded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dht22Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct Dht22 {
    pin: i32,
    last_attempt_ms: Option<u64>,
    last_good: Option<Dht22Reading>,
}

impl Dht22 {
    pub fn new(pin: i32) -> Self {
        Self {
            pin,
            last_attempt_ms: None,
            last_good: None,
        }
    }

    /// Read the sensor, rate-limited to one bus transaction per 2 s.
    ///
    /// Calls inside the minimum interval return the cached frame, or
    /// [`SensorError::NotReady`] when no good frame exists yet.
    pub fn read(&mut self, now_ms: u64) -> Result<Dht22Reading, SensorError> {
        if let Some(last) = self.last_attempt_ms {
            if now_ms.saturating_sub(last) < MIN_SAMPLE_INTERVAL_MS {
                return self.last_good.ok_or(SensorError::NotReady);
            }
        }
        self.last_attempt_ms = Some(now_ms);

        let reading = self.transact()?;
        if !TEMP_SPAN_C.contains(&reading.temperature_c)
            || !HUM_SPAN_PCT.contains(&reading.humidity_pct)
        {
            return Err(SensorError::OutOfRange);
        }
        self.last_good = Some(reading);
        Ok(reading)
    }

    // ── Real bus transaction ──────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn transact(&mut self) -> Result<Dht22Reading, SensorError> {
        let frame = self.read_frame()?;

        let checksum = frame[0]
            .wrapping_add(frame[1])
            .wrapping_add(frame[2])
            .wrapping_add(frame[3]);
        if checksum != frame[4] {
            return Err(SensorError::ChecksumMismatch);
        }

        let humidity_pct = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
        let raw_temp = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
        let mut temperature_c = f32::from(raw_temp) / 10.0;
        if frame[2] & 0x80 != 0 {
            temperature_c = -temperature_c;
        }

        Ok(Dht22Reading {
            temperature_c,
            humidity_pct,
        })
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        // Start condition: pull the bus low >1 ms, release, give the
        // sensor 20–40 µs to take over.
        hw_init::gpio_set_dir(self.pin, true);
        hw_init::gpio_write(self.pin, false);
        hw_init::delay_us(1_200);
        hw_init::gpio_write(self.pin, true);
        hw_init::gpio_set_dir(self.pin, false);

        // Acknowledge: 80 µs low, 80 µs high.
        self.wait_for(false, 60).map_err(|_| SensorError::NoResponse)?;
        self.wait_for(true, 100)?;
        self.wait_for(false, 100)?;

        // 40 data bits: 50 µs low separator, then a high pulse whose
        // width encodes the bit (≈27 µs = 0, ≈70 µs = 1).
        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_for(true, 70)?;
            let high_us = self.wait_for(false, 90)?;
            if high_us > 48 {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Busy-wait until the bus reaches `level`, returning the elapsed
    /// microseconds, or [`SensorError::Timeout`] past `timeout_us`.
    #[cfg(target_os = "espidf")]
    fn wait_for(&self, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
        let mut elapsed = 0u32;
        while hw_init::gpio_read(self.pin) != level {
            if elapsed >= timeout_us {
                return Err(SensorError::Timeout);
            }
            hw_init::delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }

    // ── Host simulation ───────────────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn transact(&mut self) -> Result<Dht22Reading, SensorError> {
        if SIM_FAIL.load(Ordering::Relaxed) {
            return Err(SensorError::NoResponse);
        }
        let _ = self.pin;
        Ok(Dht22Reading {
            temperature_c: f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUM_BITS.load(Ordering::Relaxed)),
        })
    }
}
