//! Function-pointer finite state machine for the robot's operating mode.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ModeTable                                               │
//! │  ┌───────────┬───────────┬──────────┬─────────────────┐  │
//! │  │ Mode      │ on_enter  │ on_exit  │ on_update       │  │
//! │  ├───────────┼───────────┼──────────┼─────────────────┤  │
//! │  │ Auto      │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option │  │
//! │  │ LightSeek │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option │  │
//! │  │ Reset     │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option │  │
//! │  └───────────┴───────────┴──────────┴─────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine first calls `on_update` for the **current** mode,
//! which handles time-based transitions.  Only if that returns `None`
//! does it look for a button rising edge, which toggles the mode.  At
//! most one transition fires per tick, so a button press that lands on
//! the same tick as a timeout is ignored.
//!
//! Every transition stamps `BotContext::mode_clock` with the tick time
//! before the new mode's `on_enter` runs.

pub mod context;
pub mod modes;

use core::fmt;

use context::BotContext;
use log::info;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Enumeration of all operating modes.
/// Must stay in sync with the table built in [`modes::build_mode_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Automatic navigation inside a light window.
    Auto = 0,
    /// Guided towards darker places, for a limited time.
    LightSeek = 1,
    /// Time is up: head back to the start.
    Reset = 2,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert an index back to `Mode`.  Panics on out-of-range in debug
    /// builds; returns `Auto` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Auto,
            1 => Self::LightSeek,
            2 => Self::Reset,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Auto
            }
        }
    }

    /// Mode the button switches to from `self`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::LightSeek,
            Self::LightSeek | Self::Reset => Self::Auto,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "AUTO"),
            Self::LightSeek => write!(f, "LIGHT"),
            Self::Reset => write!(f, "RESET"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Why a mode transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionCause {
    /// The current mode's time limit ran out.
    Timeout,
    /// Button rising edge.
    Button,
    /// Operator command.
    Forced,
}

/// A completed mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
    pub cause: TransitionCause,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type ModeActionFn = fn(&mut BotContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` when the mode's time limit has run out.
pub type ModeUpdateFn = fn(&BotContext) -> Option<Mode>;

/// Static descriptor for a single mode.
pub struct ModeDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<ModeActionFn>,
    pub on_exit: Option<ModeActionFn>,
    pub on_update: ModeUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The mode state machine.
pub struct ModeMachine {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [ModeDescriptor; Mode::COUNT],
    /// Index of the currently active mode.
    current: usize,
    /// Transitions taken since construction.
    transitions: u64,
}

impl ModeMachine {
    /// Construct a machine with the given table, starting in `initial`.
    pub fn new(table: [ModeDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Stamp the mode clock and run the initial `on_enter`.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut BotContext) {
        info!("Mode machine starting in {}", self.table[self.current].name);
        ctx.mode_clock = ctx.now;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance by one tick.  Returns the transition taken, if any.
    ///
    /// 1. `on_update` of the current mode (timeouts).
    /// 2. Otherwise, a button rising edge toggles the mode.
    pub fn tick(&mut self, ctx: &mut BotContext) -> Option<ModeChange> {
        let current = self.current_mode();

        let next = match (self.table[self.current].on_update)(ctx) {
            Some(next) => Some((next, TransitionCause::Timeout)),
            None if ctx.button_rising_edge() => Some((current.toggled(), TransitionCause::Button)),
            None => None,
        };

        next.map(|(to, cause)| self.transition(to, cause, ctx))
    }

    /// Jump to `next` regardless of timers or the button.
    /// Returns `None` if already in `next`.
    pub fn force_transition(&mut self, next: Mode, ctx: &mut BotContext) -> Option<ModeChange> {
        (next as usize != self.current).then(|| self.transition(next, TransitionCause::Forced, ctx))
    }

    /// The active mode.
    pub fn current_mode(&self) -> Mode {
        Mode::from_index(self.current)
    }

    /// Number of transitions taken so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: Mode, cause: TransitionCause, ctx: &mut BotContext) -> ModeChange {
        let from = self.current_mode();
        let next_idx = next as usize;

        info!(
            "Mode transition ({:?}): {} -> {}",
            cause, self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions += 1;
        ctx.mode_clock = ctx.now;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }

        ModeChange { from, to: next, cause }
    }
}
