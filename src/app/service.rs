//! Application service, the hexagonal core.
//!
//! [`BotService`] owns the mode machine, the hazard detector and the
//! robot state ([`BotContext`]).  It exposes a hardware-agnostic API;
//! all I/O flows through port traits injected at call sites.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │         BotService          │
//!                 │ history · hazards · modes   │ ──▶ Directive
//!                 └─────────────────────────────┘
//! ```
//!
//! ## Tick pipeline
//!
//! 1. Append the frame to the history.
//! 2. Bootstrap: with fewer than two frames, record the light baseline
//!    and stop (no directive).
//! 3. Mode machine tick (timeouts, then button edge).
//! 4. Hazard detection: fall → collision → blocked path.
//! 5. Hazard directive, or the mode's behavior when no hazard fired.

use core::time::Duration;

use log::{debug, info, warn};

use crate::behavior;
use crate::config::BotConfig;
use crate::directive::Directive;
use crate::error::{Error, Result};
use crate::fsm::context::BotContext;
use crate::fsm::modes::build_mode_table;
use crate::fsm::{Mode, ModeMachine};
use crate::hazard::HazardDetector;
use crate::history::HistoryBuffer;
use crate::sensors::SensorFrame;

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// BotService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all decision logic.
pub struct BotService {
    machine: ModeMachine,
    ctx: BotContext,
    hazards: HazardDetector,
    tick_count: u64,
}

impl BotService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the mode machine; call [`start`](Self::start) next.
    pub fn new(config: BotConfig) -> Self {
        Self {
            machine: ModeMachine::new(build_mode_table(), Mode::Auto),
            ctx: BotContext::new(config),
            hazards: HazardDetector::new(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start in Auto mode with the mode clock stamped at `now`.
    pub fn start(&mut self, now: Duration, sink: &mut impl EventSink) {
        self.ctx.now = now;
        self.machine.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.machine.current_mode()));
        info!("BotService started in {}", self.machine.current_mode());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Read one frame through `sensors` and process it.
    pub fn tick(
        &mut self,
        sensors: &mut impl SensorPort,
        now: Duration,
        sink: &mut impl EventSink,
    ) -> Option<Directive> {
        let frame = sensors.read_frame();
        self.process_frame(frame, now, sink)
    }

    /// Run one full decision cycle on `frame`, sampled at monotonic time `now`.
    ///
    /// Returns `None` on bootstrap ticks (fewer than two frames recorded);
    /// every other tick yields exactly one directive.
    pub fn process_frame(
        &mut self,
        frame: SensorFrame,
        now: Duration,
        sink: &mut impl EventSink,
    ) -> Option<Directive> {
        self.tick_count += 1;
        // A clock that steps backwards must not re-open an expired mode window.
        self.ctx.now = now.max(self.ctx.now);

        // 1. Record
        self.ctx.history.append(frame);

        // 2. Bootstrap
        if self.ctx.history.is_insufficient() {
            self.ctx.light_baseline = frame.light;
            debug!("bootstrap tick, light baseline {}", frame.light);
            return None;
        }
        debug!("tick {} | {}", self.tick_count, frame);

        // 3. Mode machine
        let change = self.machine.tick(&mut self.ctx);
        if let Some(change) = change {
            sink.emit(&AppEvent::ModeChanged(change));
        }

        // 4. Hazards
        let prev_flags = self.hazards.flags();
        let hazard = self.hazards.evaluate(&frame, &self.ctx.config);
        self.report_hazard_edges(prev_flags, sink);

        // 5. Directive
        let mut directive = match hazard {
            Some(hazard) => {
                debug!("{} overrides {} behavior", hazard, self.machine.current_mode());
                Directive::for_hazard(hazard)
            }
            None => behavior::select(
                self.machine.current_mode(),
                &frame,
                &mut self.ctx.light_baseline,
                &self.ctx.config,
            ),
        };
        if let Some(change) = change {
            directive.push_front(change.into());
        }

        if self.tick_count % self.ctx.config.ticks_per_telemetry() == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }

        Some(directive)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) -> Result<()> {
        match cmd {
            AppCommand::ForceMode(target) => {
                if let Some(change) = self.machine.force_transition(target, &mut self.ctx) {
                    sink.emit(&AppEvent::ModeChanged(change));
                }
                Ok(())
            }
            AppCommand::UpdateConfig(new_config) => {
                if let Err(msg) = new_config.validate() {
                    warn!("Rejected configuration update: {}", msg);
                    return Err(Error::Config(msg));
                }
                self.ctx.config = new_config;
                info!("Configuration updated at runtime");
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            mode: self.machine.current_mode(),
            frame: self.ctx.history.latest().ok().copied(),
            light_baseline: self.ctx.light_baseline,
            time_in_mode: self.ctx.elapsed_in_mode(),
            history_len: self.ctx.history.len(),
            hazard_flags: self.hazards.flags(),
            ticks: self.tick_count,
        }
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.machine.current_mode()
    }

    pub fn light_baseline(&self) -> i32 {
        self.ctx.light_baseline
    }

    /// Monotonic time at which the current mode was entered.
    pub fn mode_clock(&self) -> Duration {
        self.ctx.mode_clock
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.ctx.history
    }

    /// Total ticks processed since startup, bootstrap ticks included.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Hazard bitmask from the last non-bootstrap tick.
    pub fn hazard_flags(&self) -> u8 {
        self.hazards.flags()
    }

    pub fn config(&self) -> &BotConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn report_hazard_edges(&self, prev_flags: u8, sink: &mut impl EventSink) {
        let flags = self.hazards.flags();
        if flags & !prev_flags != 0 {
            sink.emit(&AppEvent::HazardDetected(flags));
        } else if flags == 0 && prev_flags != 0 {
            sink.emit(&AppEvent::HazardsCleared);
        }
    }
}
