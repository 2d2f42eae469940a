//! ClimaBox firmware library.
//!
//! Regulates an enclosed environment's temperature and humidity with four
//! bang-bang controllers (heater, cooler, humidifier, de-humidifier) over
//! two DHT22-backed sensor roles, gated by anti-short-cycle interlocks.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod scheduler;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
