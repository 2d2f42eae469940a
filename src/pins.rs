//! GPIO pin assignments for the ClimaBox main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// DHT22 combined temperature/humidity sensor (single-wire bus)
// ---------------------------------------------------------------------------

/// Bidirectional data line.  One physical DHT22 serves both the temperature
/// and the humidity sensor role.
pub const DHT_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Actuator relays (digital outputs, active HIGH)
// ---------------------------------------------------------------------------

pub const HEATER_GPIO: i32 = 4;
pub const COOLER_GPIO: i32 = 5;
pub const HUMIDIFIER_GPIO: i32 = 6;
pub const DE_HUMIDIFIER_GPIO: i32 = 7;
