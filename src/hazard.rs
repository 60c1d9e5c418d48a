//! Hazard detection.
//!
//! Pure predicates over a single [`SensorFrame`] plus the bot's body
//! geometry, and a [`HazardDetector`] that latches the results into a
//! bitmask each tick.
//!
//! ## Precedence
//!
//! Hazards are ranked by how bad it is to ignore them:
//!
//! 1. [`Hazard::Falling`]: the floor has dropped away.
//! 2. [`Hazard::Colliding`]: the body is hitting something.
//! 3. [`Hazard::PathBlocked`]: the passage is narrower than the body.
//!
//! Only the highest-ranked active hazard drives the directive.  The
//! proximity advisory ([`is_near_obstacle_ahead`]) is not a hazard: it is
//! checked only when none of the above fired, and never pre-empts the
//! mode behavior.

use core::fmt;

use log::{info, warn};

use crate::config::BotConfig;
use crate::sensors::SensorFrame;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Static body dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width_cm: u32,
    pub height_cm: u32,
}

impl Geometry {
    /// Half the body width, the clearance needed on each side.
    pub fn radius_cm(&self) -> f32 {
        self.width_cm as f32 / 2.0
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------
//
// Comparisons against half a dimension are done on doubled integers so an
// odd width or height keeps its half unit without floating point.

/// The floor sensor sees further down than half the body height.
pub fn is_falling(frame: &SensorFrame, geometry: &Geometry) -> bool {
    u64::from(frame.distance_down) * 2 > u64::from(geometry.height_cm)
}

/// Vibration exceeds the collision threshold.
pub fn is_colliding(frame: &SensorFrame, collision_threshold: u32) -> bool {
    frame.vibration > collision_threshold
}

/// Both sides have more than one radius of clearance.
pub fn can_pass_through(frame: &SensorFrame, geometry: &Geometry) -> bool {
    let width = u64::from(geometry.width_cm);
    u64::from(frame.distance_left) * 2 > width && u64::from(frame.distance_right) * 2 > width
}

/// Something is within the warning distance in front.
pub fn is_near_obstacle_ahead(frame: &SensorFrame, warning_distance_cm: u32) -> bool {
    frame.distance_front <= warning_distance_cm
}

// ---------------------------------------------------------------------------
// Hazard
// ---------------------------------------------------------------------------

/// A condition that pre-empts normal mode behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Hazard {
    Falling = 0b0000_0001,
    Colliding = 0b0000_0010,
    PathBlocked = 0b0000_0100,
}

impl Hazard {
    /// All hazards, highest priority first.
    pub const PRECEDENCE: [Hazard; 3] = [Hazard::Falling, Hazard::Colliding, Hazard::PathBlocked];

    /// Return the bitmask for this hazard.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Evaluate this hazard's predicate against `frame`.
    pub fn is_present(self, frame: &SensorFrame, config: &BotConfig) -> bool {
        match self {
            Self::Falling => is_falling(frame, &config.geometry()),
            Self::Colliding => is_colliding(frame, config.collision_threshold),
            Self::PathBlocked => !can_pass_through(frame, &config.geometry()),
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Falling => write!(f, "falling"),
            Self::Colliding => write!(f, "colliding"),
            Self::PathBlocked => write!(f, "path blocked"),
        }
    }
}

/// Highest-priority hazard present in `frame`, short-circuiting on the
/// first match.
pub fn first_hazard(frame: &SensorFrame, config: &BotConfig) -> Option<Hazard> {
    Hazard::PRECEDENCE
        .into_iter()
        .find(|h| h.is_present(frame, config))
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Latches hazard flags across ticks so set/clear edges can be reported.
pub struct HazardDetector {
    /// Hazard bitmask from the most recent evaluation.
    flags: u8,
}

impl Default for HazardDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl HazardDetector {
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Evaluate every hazard against `frame`, update the latched flags and
    /// return the highest-priority one present.
    pub fn evaluate(&mut self, frame: &SensorFrame, config: &BotConfig) -> Option<Hazard> {
        for hazard in Hazard::PRECEDENCE {
            self.eval_hazard(hazard, hazard.is_present(frame, config));
        }
        self.primary()
    }

    /// Current hazard bitmask.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// True if **any** hazard is active.
    pub fn has_hazards(&self) -> bool {
        self.flags != 0
    }

    pub fn has_hazard(&self, hazard: Hazard) -> bool {
        self.flags & hazard.mask() != 0
    }

    /// Highest-priority latched hazard.
    pub fn primary(&self) -> Option<Hazard> {
        Hazard::PRECEDENCE.into_iter().find(|&h| self.has_hazard(h))
    }

    // ── Internal ──────────────────────────────────────────────────

    fn eval_hazard(&mut self, hazard: Hazard, condition: bool) {
        if condition {
            if self.flags & hazard.mask() == 0 {
                warn!("HAZARD SET: {hazard}");
            }
            self.flags |= hazard.mask();
        } else {
            if self.flags & hazard.mask() != 0 {
                info!("HAZARD CLEARED: {hazard}");
            }
            self.flags &= !hazard.mask();
        }
    }
}
