//! Climate control core — pure decision logic, zero I/O.
//!
//! The only parts of the system with real state and timing semantics live
//! here: the inclusive threshold [`Range`](range::Range), the anti-chatter
//! [`interlock`] gates, and the bang-bang
//! [`ClimateController`](controller::ClimateController) that combines them.
//! Time flows in as caller-supplied millisecond timestamps; nothing in this
//! module reads a clock or touches hardware.

pub mod controller;
pub mod interlock;
pub mod range;
