//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements   | Connects to                 |
//! |------------------|--------------|-----------------------------|
//! | `config_store`   | ConfigPort   | JSON file                   |
//! | `display`        | DisplayPort  | stdout                      |
//! | `log_sink`       | EventSink    | `log` facade                |
//! | `sim`            | SensorPort   | simulated world / JSON trace|
//! | `time`           | ClockPort    | `std::time::Instant`        |
//!
//! The GrovePi board and the RGB LCD live in [`crate::drivers`]; the
//! `grovepi` feature adds `i2c_host`, which opens them on a Linux
//! I²C device.

pub mod config_store;
pub mod display;
#[cfg(feature = "grovepi")]
pub mod i2c_host;
pub mod log_sink;
pub mod sim;
pub mod time;
