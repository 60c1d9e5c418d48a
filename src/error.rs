//! Unified error types for the robot controller.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! control loop handles failures uniformly.  All variants are `Copy`
//! and carry no heap data.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The history buffer could not answer a query.
    History(HistoryError),
    /// A sensor channel could not be read.
    Sensor(SensorError),
    /// The status display rejected a write.
    Display(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History(e) => write!(f, "history: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Display(msg) => write!(f, "display: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// History errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// No frame has been recorded yet.
    Empty,
    /// Fewer than two frames are recorded, so no previous frame exists.
    Insufficient,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no frames recorded"),
            Self::Insufficient => write!(f, "fewer than two frames recorded"),
        }
    }
}

impl From<HistoryError> for Error {
    fn from(e: HistoryError) -> Self {
        Self::History(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The I²C transaction with the sensor board failed.
    BusFailed,
    /// The ultrasonic ranger never saw its echo.
    NoEcho,
    /// Nothing is wired to the requested port.
    Unwired,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusFailed => write!(f, "I2C bus transaction failed"),
            Self::NoEcho => write!(f, "ranger returned no echo"),
            Self::Unwired => write!(f, "channel not wired"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
