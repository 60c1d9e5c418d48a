//! Host-side sensor sources.
//!
//! - [`SimWorld`]: a deterministic closed-loop world.  The front obstacle
//!   approaches while the bot moves forward and recedes while it backs off,
//!   light drifts along a slow triangle wave, and floor edges, narrow
//!   passages, knocks and button presses are scheduled at fixed periods.
//! - [`TraceReplayer`]: replays a recorded JSON array of frames.
//!
//! Both implement [`SensorPort`], so `main` can swap them for the GrovePi
//! hub without touching the core.

use std::fmt;
use std::fs;
use std::path::Path;

use log::info;

use crate::app::ports::SensorPort;
use crate::directive::MovementIntent;
use crate::sensors::{ButtonState, NO_READING, ON_SURFACE, SensorFrame};

// ───────────────────────────────────────────────────────────────
// Simulated world
// ───────────────────────────────────────────────────────────────

const LIGHT_MIN: i32 = 300;
const LIGHT_MAX: i32 = 700;
/// Ticks for one light rise (and again for one fall).
const LIGHT_HALF_PERIOD: u64 = 400;

const WALL_START_CM: u32 = 200;
const STEP_CM: u32 = 2;

const EDGE_PERIOD: u64 = 700;
const NARROW_PERIOD: u64 = 500;
const KNOCK_PERIOD: u64 = 900;
const BUTTON_PERIOD: u64 = 1500;
/// Ticks each scheduled event lasts.
const EVENT_TICKS: u64 = 3;

/// Deterministic stand-in for the robot's surroundings.
pub struct SimWorld {
    step: u64,
    rng: u32,
    wall_cm: u32,
}

impl SimWorld {
    /// `seed` only drives sensor noise; the event schedule is fixed.
    pub fn new(seed: u32) -> Self {
        Self {
            step: 0,
            // xorshift has a fixed point at zero
            rng: seed.max(1),
            wall_cm: WALL_START_CM,
        }
    }

    /// Feed back the intent acted on this tick.
    pub fn apply(&mut self, intent: MovementIntent) {
        self.wall_cm = match intent {
            MovementIntent::MoveForward => self.wall_cm.saturating_sub(STEP_CM),
            MovementIntent::SlowDown => self.wall_cm.saturating_sub(STEP_CM / 2),
            MovementIntent::MoveBack => (self.wall_cm + STEP_CM).min(NO_READING),
            MovementIntent::Hold => self.wall_cm,
        };
        // A wall we have touched is bypassed; a new one appears further on.
        if self.wall_cm == 0 {
            self.wall_cm = WALL_START_CM;
        }
    }

    fn noise(&mut self, amplitude: u32) -> u32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng = x;
        x % (amplitude + 1)
    }

    fn in_event(&self, period: u64) -> bool {
        self.step > 0 && self.step % period < EVENT_TICKS
    }

    fn light(&mut self) -> i32 {
        let phase = (self.step % (2 * LIGHT_HALF_PERIOD)) as i32;
        let half = LIGHT_HALF_PERIOD as i32;
        let ramp = if phase < half { phase } else { 2 * half - phase };
        let jitter = self.noise(10) as i32 - 5;
        LIGHT_MIN + ramp * (LIGHT_MAX - LIGHT_MIN) / half + jitter
    }

    fn next_frame(&mut self) -> SensorFrame {
        let side = if self.in_event(NARROW_PERIOD) { 10 } else { 40 };
        let knock = if self.in_event(KNOCK_PERIOD) { 1500 } else { 0 };

        let frame = SensorFrame {
            distance_front: self.wall_cm,
            distance_up: NO_READING,
            distance_down: if self.in_event(EDGE_PERIOD) { 8 } else { ON_SURFACE },
            distance_left: side + self.noise(2),
            distance_right: side + self.noise(2),
            light: self.light(),
            button: ButtonState::from(self.step % BUTTON_PERIOD == BUTTON_PERIOD - 1),
            vibration: knock + self.noise(200),
        };
        self.step += 1;
        frame
    }
}

impl SensorPort for SimWorld {
    fn read_frame(&mut self) -> SensorFrame {
        self.next_frame()
    }
}

// ───────────────────────────────────────────────────────────────
// Trace replay
// ───────────────────────────────────────────────────────────────

/// Errors loading a recorded trace.
#[derive(Debug)]
pub enum TraceError {
    /// The file could not be read.
    Io,
    /// The file is not a JSON array of frames.
    Malformed,
    /// The trace holds no frames.
    Empty,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "trace file unreadable"),
            Self::Malformed => write!(f, "trace is not a JSON array of frames"),
            Self::Empty => write!(f, "trace holds no frames"),
        }
    }
}

impl std::error::Error for TraceError {}

/// Replays recorded frames in order, then keeps repeating the last one.
pub struct TraceReplayer {
    frames: Vec<SensorFrame>,
    cursor: usize,
}

impl TraceReplayer {
    pub fn new(frames: Vec<SensorFrame>) -> Result<Self, TraceError> {
        if frames.is_empty() {
            return Err(TraceError::Empty);
        }
        Ok(Self { frames, cursor: 0 })
    }

    /// Parse a JSON array of frames.  Missing fields take idle defaults.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let frames: Vec<SensorFrame> =
            serde_json::from_str(json).map_err(|_| TraceError::Malformed)?;
        Self::new(frames)
    }

    pub fn from_path(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path).map_err(|_| TraceError::Io)?;
        let replayer = Self::from_json(&json)?;
        info!(
            "TraceReplayer: {} frames from {}",
            replayer.frames.len(),
            path.display()
        );
        Ok(replayer)
    }

    /// `true` once every recorded frame has been handed out.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl SensorPort for TraceReplayer {
    fn read_frame(&mut self) -> SensorFrame {
        let idx = self.cursor.min(self.frames.len() - 1);
        self.cursor = self.cursor.saturating_add(1);
        self.frames[idx]
    }
}
