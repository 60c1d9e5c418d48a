//! Outbound application events.
//!
//! The [`BotService`](super::service::BotService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use core::time::Duration;

use crate::fsm::{Mode, ModeChange};
use crate::sensors::SensorFrame;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The mode machine switched modes.
    ModeChanged(ModeChange),

    /// One or more hazards were raised (bitmask of `Hazard::mask()`).
    HazardDetected(u8),

    /// All hazards have cleared.
    HazardsCleared,

    /// The service has started (carries the initial mode).
    Started(Mode),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub mode: Mode,
    /// Most recent frame, if any has been recorded.
    pub frame: Option<SensorFrame>,
    pub light_baseline: i32,
    pub time_in_mode: Duration,
    pub history_len: usize,
    pub hazard_flags: u8,
    pub ticks: u64,
}
