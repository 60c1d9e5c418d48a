//! Application core: decision logic behind port traits, zero I/O.
//!
//! The [`service::BotService`] wires the mode machine, hazard detector
//! and behavior selector together.  All interaction with hardware
//! happens through the **port traits** defined in [`ports`], keeping this
//! layer fully testable without a GrovePi attached.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
