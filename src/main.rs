//! UbiBot main entry point
//!
//! Hexagonal architecture with a fixed-rate sampling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GrovePi hub / SimWorld /   GroveLcd /       LogEventSink      │
//! │  TraceReplayer              ConsoleDisplay   (EventSink)       │
//! │  (SensorPort)               (DisplayPort)                      │
//! │  JsonConfigStore            MonotonicClock                     │
//! │  (ConfigPort)               (ClockPort)                        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              BotService (pure logic)                   │    │
//! │  │  History · Modes · Hazards · Behavior                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without a trace the bot runs in the simulated world until interrupted;
//! with one it stops after the last recorded frame.  Built with the
//! `grovepi` feature, `--i2c /dev/i2c-1` reads the real board and writes
//! to the RGB LCD instead.  The log filter comes from `UBIBOT_LOG`
//! (`tracing-subscriber` `EnvFilter` syntax, default `info`).

#![deny(unused_must_use)]

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ubibot::adapters::config_store::JsonConfigStore;
use ubibot::adapters::display::ConsoleDisplay;
#[cfg(feature = "grovepi")]
use ubibot::adapters::i2c_host::{self, BoardHub, BoardLcd};
use ubibot::adapters::log_sink::LogEventSink;
use ubibot::adapters::sim::{SimWorld, TraceReplayer};
use ubibot::adapters::time::MonotonicClock;
use ubibot::app::ports::{ClockPort, DisplayPort, SensorPort};
use ubibot::app::service::BotService;
use ubibot::config::BotConfig;
use ubibot::directive::{Directive, MovementIntent};
#[cfg(feature = "grovepi")]
use ubibot::sensors::hub::ChannelMap;
use ubibot::sensors::SensorFrame;

/// Text shown while the history is still bootstrapping.
const STARTUP_TEXT: &str = "Starting up...";

const SIM_SEED: u32 = 0x5eed;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "UBIBOT_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

// ── Command line ──────────────────────────────────────────────

/// Sensor-driven control loop for the UbiBot
#[derive(Parser, Debug)]
#[command(name = "ubibot", version, long_about = None)]
struct Cli {
    /// JSON config file; missing fields and a missing file fall back to defaults
    config: Option<PathBuf>,

    /// Recorded JSON trace to replay instead of the simulated world
    trace: Option<PathBuf>,

    /// Read the GrovePi board and drive the LCD on this I²C device
    #[cfg(feature = "grovepi")]
    #[arg(long, value_name = "DEV", conflicts_with = "trace")]
    i2c: Option<PathBuf>,

    /// Read every ranger, not only the front one
    #[cfg(feature = "grovepi")]
    #[arg(long, requires = "i2c")]
    all_rangers: bool,
}

// ── Sensor source ─────────────────────────────────────────────

enum Source {
    Sim(SimWorld),
    Trace(TraceReplayer),
    #[cfg(feature = "grovepi")]
    Board(BoardHub),
}

impl Source {
    fn is_finished(&self) -> bool {
        match self {
            Self::Trace(trace) => trace.is_finished(),
            _ => false,
        }
    }

    /// Close the loop: the simulated world reacts to what the bot does.
    fn apply(&mut self, intent: MovementIntent) {
        if let Self::Sim(world) = self {
            world.apply(intent);
        }
    }
}

impl SensorPort for Source {
    fn read_frame(&mut self) -> SensorFrame {
        match self {
            Self::Sim(world) => world.read_frame(),
            Self::Trace(trace) => trace.read_frame(),
            #[cfg(feature = "grovepi")]
            Self::Board(hub) => hub.read_frame(),
        }
    }
}

// ── Status display ────────────────────────────────────────────

enum Screen {
    Console(ConsoleDisplay),
    #[cfg(feature = "grovepi")]
    Lcd(BoardLcd),
}

impl DisplayPort for Screen {
    fn show(&mut self, text: &str) -> ubibot::error::Result<()> {
        match self {
            Self::Console(console) => console.show(text),
            #[cfg(feature = "grovepi")]
            Self::Lcd(lcd) => lcd.show(text),
        }
    }
}

// ── Setup helpers ─────────────────────────────────────────────

/// Parse `directives` as a log filter, falling back to `info` when unset
/// or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the stderr subscriber.  `log` records are bridged into it.
fn init_logging() -> Result<()> {
    let filter = log_filter(std::env::var(LOG_ENV).ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("installing logger: {e}"))
}

fn load_config(path: Option<&Path>) -> BotConfig {
    let Some(path) = path else {
        info!("No config file given, using defaults");
        return BotConfig::default();
    };
    match JsonConfigStore::new(path).load_or_default() {
        Ok(config) => config,
        Err(e) => {
            warn!("Config {} unusable ({}), running with defaults", path.display(), e);
            BotConfig::default()
        }
    }
}

fn open_source(cli: &Cli) -> Result<Source> {
    #[cfg(feature = "grovepi")]
    if let Some(dev) = &cli.i2c {
        let channels = if cli.all_rangers {
            ChannelMap::full()
        } else {
            ChannelMap::default()
        };
        let hub = i2c_host::open_board(dev, channels)
            .with_context(|| format!("opening GrovePi on {}", dev.display()))?;
        return Ok(Source::Board(hub));
    }

    match &cli.trace {
        Some(path) => {
            let trace = TraceReplayer::from_path(path)
                .with_context(|| format!("loading trace {}", path.display()))?;
            Ok(Source::Trace(trace))
        }
        None => {
            info!("No trace given, running the simulated world");
            Ok(Source::Sim(SimWorld::new(SIM_SEED)))
        }
    }
}

fn open_screen(cli: &Cli) -> Result<Screen> {
    #[cfg(feature = "grovepi")]
    if let Some(dev) = &cli.i2c {
        let lcd = i2c_host::open_lcd(dev)
            .with_context(|| format!("opening LCD on {}", dev.display()))?;
        return Ok(Screen::Lcd(lcd));
    }

    #[cfg(not(feature = "grovepi"))]
    let _ = cli;
    Ok(Screen::Console(ConsoleDisplay::stdout()))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 1. Logging ────────────────────────────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  UbiBot v{}                          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration and I/O ──────────────────────────────
    let config = load_config(cli.config.as_deref());
    let mut source = open_source(&cli)?;
    let mut display = open_screen(&cli)?;

    // ── 3. Adapters and service ───────────────────────────────
    let clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();

    let period = config.tick_period();
    info!(
        "Sampling at {} Hz ({} ms per tick)",
        config.loop_frequency_hz,
        period.as_millis()
    );

    let mut service = BotService::new(config);
    service.start(clock.now(), &mut sink);

    // ── 4. Sampling loop ──────────────────────────────────────
    loop {
        let tick_start = clock.now();

        let directive = service.tick(&mut source, tick_start, &mut sink);
        let intent = directive
            .as_ref()
            .map_or(MovementIntent::Hold, Directive::speed_limited_intent);

        let shown = match &directive {
            Some(d) => display.show(&d.status_text()),
            None => display.show(STARTUP_TEXT),
        };
        if let Err(e) = shown {
            warn!("Display update failed: {}", e);
        }
        debug!("[{}] intent: {}", service.mode(), intent);

        source.apply(intent);

        if source.is_finished() {
            info!(
                "Trace finished after {} ticks in mode {}",
                service.tick_count(),
                service.mode()
            );
            break;
        }

        thread::sleep(period.saturating_sub(clock.now().saturating_sub(tick_start)));
    }

    Ok(())
}
