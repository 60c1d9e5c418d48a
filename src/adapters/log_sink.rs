//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! through the `log` facade.  A telemetry uplink would implement the same
//! trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => match &t.frame {
                Some(frame) => info!(
                    "TELEM | mode={} for {}s | baseline={} | {} | history={} | \
                     hazards=0b{:03b} | ticks={}",
                    t.mode,
                    t.time_in_mode.as_secs(),
                    t.light_baseline,
                    frame,
                    t.history_len,
                    t.hazard_flags,
                    t.ticks,
                ),
                None => info!("TELEM | mode={} | no frames yet | ticks={}", t.mode, t.ticks),
            },
            AppEvent::ModeChanged(change) => {
                info!("MODE | {} -> {} ({:?})", change.from, change.to, change.cause);
            }
            AppEvent::HazardDetected(flags) => {
                warn!("HAZARD | detected, flags=0b{:03b}", flags);
            }
            AppEvent::HazardsCleared => {
                info!("HAZARD | all cleared");
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={}", mode);
            }
        }
    }
}
