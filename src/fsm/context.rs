//! Robot state threaded through every mode handler.
//!
//! `BotContext` is the single struct mode handlers read from and write
//! to: the frame history, the light baseline, the mode clock, the
//! current tick time and the configuration.  It is owned by the
//! [`BotService`](crate::app::service::BotService), which is the only
//! writer.

use core::time::Duration;

use crate::config::BotConfig;
use crate::history::HistoryBuffer;
use crate::sensors::DEFAULT_LIGHT;

/// Mutable robot state shared by the mode machine and the behavior selector.
pub struct BotContext {
    // -- Sensor data --
    /// Bounded log of recent frames, newest last.
    pub history: HistoryBuffer,

    // -- Mode bookkeeping --
    /// Reference light level: window centre in Auto, running minimum in
    /// LightSeek.
    pub light_baseline: i32,
    /// Monotonic time at which the current mode was entered.
    pub mode_clock: Duration,
    /// Monotonic time of the tick being processed.
    pub now: Duration,

    // -- Configuration --
    pub config: BotConfig,
}

impl BotContext {
    pub fn new(config: BotConfig) -> Self {
        Self {
            history: HistoryBuffer::new(),
            light_baseline: DEFAULT_LIGHT,
            mode_clock: Duration::ZERO,
            now: Duration::ZERO,
            config,
        }
    }

    /// Time spent in the current mode as of this tick.
    pub fn elapsed_in_mode(&self) -> Duration {
        self.now.saturating_sub(self.mode_clock)
    }

    /// Light level of the most recent frame, if any.
    pub fn latest_light(&self) -> Option<i32> {
        self.history.latest().ok().map(|f| f.light)
    }

    /// Re-centre the light baseline on the most recent reading.
    pub fn capture_baseline(&mut self) {
        if let Some(light) = self.latest_light() {
            self.light_baseline = light;
        }
    }

    /// `true` when the button went from released to pressed between the
    /// two most recent frames.  Without two frames there is no edge.
    pub fn button_rising_edge(&self) -> bool {
        match (self.history.latest(), self.history.previous()) {
            (Ok(latest), Ok(previous)) => latest.button.is_pressed() && !previous.button.is_pressed(),
            _ => false,
        }
    }
}
