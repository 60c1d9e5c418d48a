//! Concrete mode handlers and table builder.
//!
//! ```text
//!            [button]                 [button]
//!   AUTO ─────────────▶ LIGHT   RESET ────────▶ AUTO
//!    ▲  ◀──────────────   │
//!    │  [button | 60 s]   │
//!    │                    │
//!    └──[600 s]──▶ RESET ◀┘ (no timeout out of RESET)
//! ```
//!
//! Timeouts are decided in `on_update`; light-baseline capture happens in
//! `on_enter`, so it applies whether the mode was entered by timeout,
//! button or command.

use log::info;

use super::context::BotContext;
use super::{Mode, ModeDescriptor};

/// Build the static mode table.  Called once at startup.
pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        // Index 0: Auto
        ModeDescriptor {
            id: Mode::Auto,
            name: "Auto",
            on_enter: Some(auto_enter),
            on_exit: None,
            on_update: auto_update,
        },
        // Index 1: LightSeek
        ModeDescriptor {
            id: Mode::LightSeek,
            name: "LightSeek",
            on_enter: Some(light_seek_enter),
            on_exit: None,
            on_update: light_seek_update,
        },
        // Index 2: Reset
        ModeDescriptor {
            id: Mode::Reset,
            name: "Reset",
            on_enter: Some(reset_enter),
            on_exit: None,
            on_update: reset_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  AUTO: navigate while the light stays near the baseline
// ═══════════════════════════════════════════════════════════════════════════

fn auto_enter(ctx: &mut BotContext) {
    ctx.capture_baseline();
    info!(
        "AUTO: light window {} ± {}",
        ctx.light_baseline, ctx.config.light_range
    );
}

fn auto_update(ctx: &BotContext) -> Option<Mode> {
    if ctx.elapsed_in_mode() >= ctx.config.auto_limit() {
        info!(
            "AUTO: {}s limit reached, switching to Reset",
            ctx.config.auto_limit_secs
        );
        return Some(Mode::Reset);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  LIGHT SEEK: follow the light downhill for a limited time
// ═══════════════════════════════════════════════════════════════════════════

fn light_seek_enter(ctx: &mut BotContext) {
    ctx.capture_baseline();
    info!(
        "LIGHT: seeking darker places for {}s from light {}",
        ctx.config.light_seek_limit_secs, ctx.light_baseline
    );
}

fn light_seek_update(ctx: &BotContext) -> Option<Mode> {
    if ctx.elapsed_in_mode() >= ctx.config.light_seek_limit() {
        info!(
            "LIGHT: {}s limit reached, returning to Auto",
            ctx.config.light_seek_limit_secs
        );
        return Some(Mode::Auto);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESET: head back to the start; left only by the button
// ═══════════════════════════════════════════════════════════════════════════

fn reset_enter(_ctx: &mut BotContext) {
    info!("RESET: returning to start, press the button to resume");
}

fn reset_update(_ctx: &BotContext) -> Option<Mode> {
    None
}
