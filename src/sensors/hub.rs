//! Frame assembly from raw per-port reads.
//!
//! [`SensorHub`] owns a [`RawSensorPort`] (normally the GrovePi driver)
//! and a [`ChannelMap`] saying which port feeds which frame field.  Each
//! tick it reads every wired channel and returns a complete
//! [`SensorFrame`].
//!
//! Individual read failures are logged and the previous good value for
//! that channel is retained, so a single flaky ranger must not stall the
//! control loop.  Unwired channels report the idle-frame default.

use log::warn;

use super::{ButtonState, NO_READING, SensorFrame};
use crate::app::ports::{RawSensorPort, SensorPort};
use crate::error::SensorError;
use crate::pins;

/// Which board port feeds each frame field.  `None` = not fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMap {
    pub ranger_front: Option<u8>,
    pub ranger_up: Option<u8>,
    pub ranger_down: Option<u8>,
    pub ranger_left: Option<u8>,
    pub ranger_right: Option<u8>,
    pub light: Option<u8>,
    pub button: Option<u8>,
    pub vibration: Option<u8>,
}

impl Default for ChannelMap {
    /// Base chassis: front ranger, light, button and vibration only.
    fn default() -> Self {
        Self {
            ranger_front: Some(pins::RANGER_FRONT_PORT),
            ranger_up: None,
            ranger_down: None,
            ranger_left: None,
            ranger_right: None,
            light: Some(pins::LIGHT_PORT),
            button: Some(pins::BUTTON_PORT),
            vibration: Some(pins::VIBRATION_PORT),
        }
    }
}

impl ChannelMap {
    /// Every ranger fitted, on the ports listed in [`pins`].
    pub fn full() -> Self {
        Self {
            ranger_up: Some(pins::RANGER_UP_PORT),
            ranger_down: Some(pins::RANGER_DOWN_PORT),
            ranger_left: Some(pins::RANGER_LEFT_PORT),
            ranger_right: Some(pins::RANGER_RIGHT_PORT),
            ..Self::default()
        }
    }
}

/// Aggregates raw board reads into a unified frame.
pub struct SensorHub<B> {
    board: B,
    channels: ChannelMap,
    /// Last frame produced; source of fallback values on read failure.
    last: SensorFrame,
    failed_reads: u32,
}

impl<B: RawSensorPort> SensorHub<B> {
    pub fn new(board: B, channels: ChannelMap) -> Self {
        Self {
            board,
            channels,
            last: SensorFrame::default(),
            failed_reads: 0,
        }
    }

    /// Total channel reads that failed since construction.
    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }

    /// Give the board back (e.g. to release the I²C bus).
    pub fn into_board(self) -> B {
        self.board
    }

    /// Read every wired channel and return a complete frame.
    pub fn read_all(&mut self) -> SensorFrame {
        let last = self.last;
        let ch = self.channels;

        let frame = SensorFrame {
            distance_front: self.ranger(ch.ranger_front, "front", last.distance_front),
            distance_up: self.ranger(ch.ranger_up, "up", last.distance_up),
            distance_down: self.ranger(ch.ranger_down, "down", last.distance_down),
            distance_left: self.ranger(ch.ranger_left, "left", last.distance_left),
            distance_right: self.ranger(ch.ranger_right, "right", last.distance_right),
            light: self
                .analog(ch.light, "light", last.light as u16)
                .into(),
            button: self.button(ch.button, last.button),
            vibration: self
                .analog(ch.vibration, "vibration", last.vibration as u16)
                .into(),
        };

        self.last = frame;
        frame
    }

    // ── Internal ──────────────────────────────────────────────────

    fn ranger(&mut self, port: Option<u8>, name: &str, fallback: u32) -> u32 {
        let Some(port) = port else {
            return fallback;
        };
        match self.board.read_ranger_cm(port) {
            // Anything at or past the ranger's reach means "nothing there".
            Ok(cm) => cm.min(NO_READING),
            Err(SensorError::NoEcho) => NO_READING,
            Err(e) => self.fallback(name, e, fallback),
        }
    }

    fn analog(&mut self, port: Option<u8>, name: &str, fallback: u16) -> u16 {
        let Some(port) = port else {
            return fallback;
        };
        match self.board.read_analog(port) {
            Ok(raw) => raw,
            Err(e) => self.fallback(name, e, fallback),
        }
    }

    fn button(&mut self, port: Option<u8>, fallback: ButtonState) -> ButtonState {
        let Some(port) = port else {
            return fallback;
        };
        match self.board.read_digital(port) {
            Ok(level) => ButtonState::from(level),
            Err(e) => self.fallback("button", e, fallback),
        }
    }

    fn fallback<T>(&mut self, name: &str, err: SensorError, value: T) -> T {
        self.failed_reads = self.failed_reads.saturating_add(1);
        warn!("sensor '{}' read failed ({}), keeping last value", name, err);
        value
    }
}

impl<B: RawSensorPort> SensorPort for SensorHub<B> {
    fn read_frame(&mut self) -> SensorFrame {
        self.read_all()
    }
}
