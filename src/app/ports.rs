//! Port traits: the hexagonal boundary between decision logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BotService (domain)
//! ```
//!
//! Driven adapters (sensor boards, displays, clocks, event sinks, config
//! storage) implement these traits.  The [`BotService`](super::service::BotService)
//! consumes them via generics, so the decision core never touches hardware.

use core::time::Duration;

use crate::config::BotConfig;
use crate::error::SensorError;
use crate::sensors::SensorFrame;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
///
/// Implementations always return a complete frame.  Channel failures are
/// the adapter's problem (log, keep the last good value, or report the
/// channel default).
pub trait SensorPort {
    fn read_frame(&mut self) -> SensorFrame;
}

/// Raw per-port reads offered by a sensor board.
///
/// [`SensorHub`](crate::sensors::hub::SensorHub) turns these into a
/// [`SensorFrame`] using a channel map.
pub trait RawSensorPort {
    /// Distance in centimetres measured by the ultrasonic ranger on `port`.
    fn read_ranger_cm(&mut self, port: u8) -> Result<u32, SensorError>;

    /// Raw ADC value of the analog sensor on `port`.
    fn read_analog(&mut self, port: u8) -> Result<u16, SensorError>;

    /// Level of the digital input on `port` (`true` = HIGH).
    fn read_digital(&mut self, port: u8) -> Result<bool, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → operator)
// ───────────────────────────────────────────────────────────────

/// Operator-facing status output (character LCD, console, ...).
pub trait DisplayPort {
    /// Replace the displayed text.
    fn show(&mut self, text: &str) -> crate::error::Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source used for mode timeouts.
pub trait ClockPort {
    /// Time since an arbitrary fixed origin.  Never goes backwards.
    fn now(&self) -> Duration;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists robot configuration.
///
/// Implementations MUST validate values before persisting and reject
/// invalid ranges with [`ConfigError::ValidationFailed`] instead of
/// clamping them.
pub trait ConfigPort {
    /// Load configuration.  [`ConfigError::NotFound`] when nothing is stored.
    fn load(&self) -> Result<BotConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &BotConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config could not be deserialised.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::NotFound => Self::Config("not found"),
            ConfigError::Corrupted => Self::Config("corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::IoError => Self::Config("I/O error"),
        }
    }
}
