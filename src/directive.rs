//! Per-tick output of the decision core.
//!
//! A [`Directive`] pairs a [`MovementIntent`] with an ordered list of
//! structured [`StatusEvent`]s.  The core never builds display strings;
//! the `Display` impls here are what a display adapter uses to render
//! the status lines.

use core::fmt;

use heapless::Vec;

use crate::fsm::{Mode, ModeChange, TransitionCause};
use crate::hazard::Hazard;

/// Upper bound on status lines in one directive: mode change, proximity
/// advisory, mode behavior, plus one spare.
pub const MAX_STATUS_LINES: usize = 4;

/// What the drive train should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementIntent {
    MoveForward,
    MoveBack,
    SlowDown,
    Hold,
}

impl fmt::Display for MovementIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveForward => write!(f, "forward"),
            Self::MoveBack => write!(f, "back"),
            Self::SlowDown => write!(f, "slow"),
            Self::Hold => write!(f, "hold"),
        }
    }
}

/// One operator-facing status line, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// The mode controller switched modes this tick.
    ModeChanged { to: Mode, cause: TransitionCause },
    /// Floor edge ahead.
    Falling,
    /// Vibration spike: the body hit something.
    Collision,
    /// Passage narrower than the body.
    CannotPass,
    /// Obstacle within the warning distance in front.
    ObstacleAhead { distance_cm: u32 },
    /// Auto mode, light inside the accepted window.
    Cruising,
    /// Auto mode, light outside the accepted window.
    LightOutOfRange { low: i32, high: i32, current: i32 },
    /// Light-seek mode, tracking the darkest reading seen.
    SeekingDarkness { current: i32, baseline: i32 },
    /// Reset mode: heading back to the start.
    ReturningToStart,
}

impl StatusEvent {
    /// Status line reporting `hazard`.
    pub fn for_hazard(hazard: Hazard) -> Self {
        match hazard {
            Hazard::Falling => Self::Falling,
            Hazard::Colliding => Self::Collision,
            Hazard::PathBlocked => Self::CannotPass,
        }
    }
}

impl From<ModeChange> for StatusEvent {
    fn from(change: ModeChange) -> Self {
        Self::ModeChanged {
            to: change.to,
            cause: change.cause,
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModeChanged { to, cause } => match cause {
                TransitionCause::Timeout => write!(f, "Time out, mode now {to}."),
                TransitionCause::Button | TransitionCause::Forced => {
                    write!(f, "Mode now {to}.")
                }
            },
            Self::Falling => write!(f, "Edge ahead, falling! Moving back."),
            Self::Collision => write!(f, "Collision! Moving back, pick a new direction."),
            Self::CannotPass => write!(f, "Path too narrow. Moving back, pick a new direction."),
            Self::ObstacleAhead { distance_cm } => {
                write!(f, "Obstacle {distance_cm}cm ahead, move slowly.")
            }
            Self::Cruising => write!(f, "Moving forward."),
            Self::LightOutOfRange { low, high, current } => write!(
                f,
                "Light {current} outside [{low} - {high}], moving back!"
            ),
            Self::SeekingDarkness { current, baseline } => {
                write!(f, "Seeking dark: light {current}, lowest {baseline}.")
            }
            Self::ReturningToStart => write!(f, "Returning to start."),
        }
    }
}

/// Fixed-capacity list of status lines, oldest first.
pub type StatusLines = Vec<StatusEvent, MAX_STATUS_LINES>;

/// Movement intent plus status for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub intent: MovementIntent,
    pub status: StatusLines,
}

impl Directive {
    pub fn new(intent: MovementIntent) -> Self {
        Self {
            intent,
            status: Vec::new(),
        }
    }

    /// Directive answering `hazard`: always move back.
    pub fn for_hazard(hazard: Hazard) -> Self {
        let mut d = Self::new(MovementIntent::MoveBack);
        d.push(StatusEvent::for_hazard(hazard));
        d
    }

    /// Append a status line.  Lines past [`MAX_STATUS_LINES`] are dropped.
    pub fn push(&mut self, event: StatusEvent) {
        if self.status.push(event).is_err() {
            debug_assert!(false, "status line overflow: {event:?}");
        }
    }

    /// Insert `event` ahead of every existing line.
    pub fn push_front(&mut self, event: StatusEvent) {
        if self.status.insert(0, event).is_err() {
            debug_assert!(false, "status line overflow: {event:?}");
        }
    }

    /// Whether any status line matches `pred`.
    pub fn has_status(&self, pred: impl Fn(&StatusEvent) -> bool) -> bool {
        self.status.iter().any(pred)
    }

    /// Intent adjusted for the proximity advisory: forward motion becomes
    /// [`MovementIntent::SlowDown`] while an obstacle is close ahead.
    pub fn speed_limited_intent(&self) -> MovementIntent {
        let advisory = self.has_status(|e| matches!(e, StatusEvent::ObstacleAhead { .. }));
        match self.intent {
            MovementIntent::MoveForward if advisory => MovementIntent::SlowDown,
            other => other,
        }
    }

    /// Status lines joined with single spaces, for text displays.
    pub fn status_text(&self) -> String {
        use core::fmt::Write;

        let mut text = String::new();
        for (i, event) in self.status.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            let _ = write!(text, "{event}");
        }
        text
    }
}
