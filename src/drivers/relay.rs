//! Latched relay driver for the four climate actuators.
//!
//! A relay is a fire-and-forget digital output: commands cannot fail at
//! this layer.  The driver latches the commanded state and skips writes
//! that would not change it, so redundant commands from the control loop
//! never reach the coil.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::info;

use crate::drivers::hw_init;

pub struct Relay {
    pin: i32,
    label: &'static str,
    on: bool,
}

impl Relay {
    /// The pin was driven low by `hw_init::init_peripherals`, so the
    /// latched state starts off.
    pub fn new(pin: i32, label: &'static str) -> Self {
        Self {
            pin,
            label,
            on: false,
        }
    }

    /// Command the relay.  Identical repeat commands are dropped.
    pub fn set(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        hw_init::gpio_write(self.pin, on);
        self.on = on;
        info!("relay {}: {}", self.label, if on { "ON" } else { "OFF" });
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
