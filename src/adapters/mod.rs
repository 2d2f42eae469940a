//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to              |
//! |------------|--------------|--------------------------|
//! | `hardware` | SensorPort   | DHT22 single-wire bus    |
//! |            | ActuatorPort | Relay GPIOs              |
//! | `log_sink` | EventSink    | Serial log output        |
//! | `nvs`      | ConfigPort   | NVS config blob          |
//! | `time`     | —            | ESP32 system timer       |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
