//! UbiBot control library.
//!
//! The decision core (history, hazards, modes, behavior) plus the thin
//! I/O ring it plugs into.  Exposed as a library for integration tests,
//! the fuzz target and the `ubibot` binary.
//!
//! ```text
//!  sensors ─▶ history ─▶ fsm ─▶ hazard ─▶ behavior ─▶ directive
//!                  └──────── app::service::BotService ───────┘
//! ```

#![deny(unused_must_use)]

pub mod app;
pub mod behavior;
pub mod config;
pub mod directive;
pub mod error;
pub mod fsm;
pub mod hazard;
pub mod history;
pub mod pins;
pub mod sensors;

pub mod adapters;
pub mod drivers;
