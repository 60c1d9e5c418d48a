//! Sensor frames and the aggregating [`SensorHub`](hub::SensorHub).
//!
//! A [`SensorFrame`] is the point-in-time snapshot of every channel the
//! bot reads in one tick.  Frames are plain `Copy` values: once built by
//! the I/O side they are only ever read, and the history buffer owns them
//! after they are appended.

pub mod hub;

use serde::{Deserialize, Serialize};

/// Ranger value meaning "no object within range".
pub const NO_READING: u32 = 1000;

/// Down-ranger value meaning "standing on the surface".
pub const ON_SURFACE: u32 = 0;

/// Light level reported before the first real reading.
pub const DEFAULT_LIGHT: i32 = 1000;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// Debounced state of the mode button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        self == Self::Pressed
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed { Self::Pressed } else { Self::Released }
    }
}

// ---------------------------------------------------------------------------
// Sensor frame
// ---------------------------------------------------------------------------

/// A snapshot of every sensor channel for one sampling tick.
///
/// Distances are in centimetres.  Horizontal and upward rangers report
/// [`NO_READING`] when nothing is in range; the downward ranger reports
/// [`ON_SURFACE`] when the wheels are on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorFrame {
    pub distance_front: u32,
    pub distance_up: u32,
    pub distance_down: u32,
    pub distance_left: u32,
    pub distance_right: u32,
    /// Ambient light in raw sensor units.  Signed so window arithmetic
    /// around a baseline cannot underflow.
    pub light: i32,
    pub button: ButtonState,
    /// Vibration magnitude in raw sensor units.
    pub vibration: u32,
}

impl Default for SensorFrame {
    fn default() -> Self {
        Self {
            distance_front: NO_READING,
            distance_up: NO_READING,
            distance_down: ON_SURFACE,
            distance_left: NO_READING,
            distance_right: NO_READING,
            light: DEFAULT_LIGHT,
            button: ButtonState::Released,
            vibration: 0,
        }
    }
}

impl core::fmt::Display for SensorFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "front={} up={} down={} left={} right={} light={} button={} vibration={}",
            self.distance_front,
            self.distance_up,
            self.distance_down,
            self.distance_left,
            self.distance_right,
            self.light,
            if self.button.is_pressed() { "pressed" } else { "released" },
            self.vibration,
        )
    }
}
