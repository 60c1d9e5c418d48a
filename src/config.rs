//! System configuration parameters
//!
//! All tunable parameters for the robot: body geometry, hazard
//! thresholds, mode timeouts and loop timing.  Values can be overridden
//! from a JSON file through the [`ConfigPort`](crate::app::ports::ConfigPort).

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::hazard::Geometry;

/// Core robot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    // --- Geometry ---
    /// Body width in cm.  Half of it is the clearance needed on each side.
    pub width_cm: u32,
    /// Body height in cm.  A floor further away than half of it is an edge.
    pub height_cm: u32,

    // --- Hazards ---
    /// Vibration magnitude above which the bot is considered colliding.
    pub collision_threshold: u32,
    /// Front distance (cm) at or below which the bot should slow down.
    pub warning_distance_cm: u32,

    // --- Light tracking ---
    /// Half-width of the accepted light window around the baseline.
    pub light_range: i32,

    // --- Mode timeouts ---
    /// Seconds the bot may stay in light-seek mode before returning to auto.
    pub light_seek_limit_secs: u32,
    /// Seconds of automatic navigation before the bot switches to reset.
    pub auto_limit_secs: u32,

    // --- Timing ---
    /// Sampling loop frequency (Hz).
    pub loop_frequency_hz: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            // Geometry
            width_cm: 30,
            height_cm: 10,

            // Hazards
            collision_threshold: 1000,
            warning_distance_cm: 10,

            // Light
            light_range: 50,

            // Mode timeouts
            light_seek_limit_secs: 60,
            auto_limit_secs: 600,

            // Timing
            loop_frequency_hz: 5,
            telemetry_interval_secs: 10,
        }
    }
}

/// Highest sampling frequency the GrovePi can sustain with a ranger attached.
pub const MAX_LOOP_FREQUENCY_HZ: u32 = 50;

impl BotConfig {
    /// Reject parameter combinations the controller cannot work with.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.width_cm == 0 {
            return Err("width_cm must be positive");
        }
        if self.height_cm == 0 {
            return Err("height_cm must be positive");
        }
        if self.light_range < 0 {
            return Err("light_range must not be negative");
        }
        if self.light_seek_limit_secs == 0 || self.auto_limit_secs == 0 {
            return Err("mode time limits must be positive");
        }
        if self.loop_frequency_hz == 0 || self.loop_frequency_hz > MAX_LOOP_FREQUENCY_HZ {
            return Err("loop_frequency_hz must be within 1..=50");
        }
        if self.telemetry_interval_secs == 0 {
            return Err("telemetry_interval_secs must be positive");
        }
        Ok(())
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            width_cm: self.width_cm,
            height_cm: self.height_cm,
        }
    }

    /// Delay between two sampling ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.loop_frequency_hz.max(1)
    }

    pub fn light_seek_limit(&self) -> Duration {
        Duration::from_secs(u64::from(self.light_seek_limit_secs))
    }

    pub fn auto_limit(&self) -> Duration {
        Duration::from_secs(u64::from(self.auto_limit_secs))
    }

    /// Number of ticks between two telemetry reports.
    pub fn ticks_per_telemetry(&self) -> u64 {
        (u64::from(self.telemetry_interval_secs) * u64::from(self.loop_frequency_hz)).max(1)
    }
}
