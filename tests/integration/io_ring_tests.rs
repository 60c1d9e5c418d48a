//! Tests for the I/O ring around the core: the sensor hub, trace replay
//! and the config store, each driven through the BotService.

use std::time::Duration;

use ubibot::adapters::config_store::JsonConfigStore;
use ubibot::adapters::sim::{SimWorld, TraceReplayer};
use ubibot::app::ports::{ConfigError, ConfigPort, SensorPort};
use ubibot::app::service::BotService;
use ubibot::config::BotConfig;
use ubibot::directive::MovementIntent;
use ubibot::error::SensorError;
use ubibot::fsm::Mode;
use ubibot::pins;
use ubibot::sensors::hub::{ChannelMap, SensorHub};
use ubibot::sensors::{DEFAULT_LIGHT, NO_READING, SensorFrame};

use crate::mock_hw::{RecordingSink, ScriptedBoard};

fn base_board() -> ScriptedBoard {
    let mut board = ScriptedBoard::default();
    board.rangers.insert(pins::RANGER_FRONT_PORT, 120);
    board.analog.insert(pins::LIGHT_PORT, 500);
    board.analog.insert(pins::VIBRATION_PORT, 12);
    board.digital.insert(pins::BUTTON_PORT, false);
    board
}

// ── SensorHub ─────────────────────────────────────────────────

#[test]
fn hub_builds_frames_for_base_chassis() {
    let mut hub = SensorHub::new(base_board(), ChannelMap::default());
    let frame = hub.read_frame();

    assert_eq!(frame.distance_front, 120);
    assert_eq!(frame.light, 500);
    assert_eq!(frame.vibration, 12);
    assert!(!frame.button.is_pressed());
    // Unfitted rangers report the idle defaults.
    let idle = SensorFrame::default();
    assert_eq!(frame.distance_down, idle.distance_down);
    assert_eq!(frame.distance_left, NO_READING);
    assert_eq!(hub.failed_reads(), 0);
}

#[test]
fn hub_failed_channel_falls_back_without_stalling() {
    let mut board = base_board();
    board.failing.insert(pins::LIGHT_PORT, SensorError::BusFailed);
    let mut hub = SensorHub::new(board, ChannelMap::default());

    let frame = hub.read_frame();
    assert_eq!(frame.light, DEFAULT_LIGHT, "nothing good read yet");
    assert_eq!(frame.distance_front, 120, "other channels unaffected");
    assert_eq!(hub.failed_reads(), 1);

    hub.read_frame();
    assert_eq!(hub.failed_reads(), 2);
}

#[test]
fn hub_maps_missing_echo_to_no_reading() {
    let mut board = base_board();
    board.failing.insert(pins::RANGER_FRONT_PORT, SensorError::NoEcho);
    let mut hub = SensorHub::new(board, ChannelMap::default());
    assert_eq!(hub.read_frame().distance_front, NO_READING);
    assert_eq!(hub.failed_reads(), 0);
}

#[test]
fn hub_feeds_service_end_to_end() {
    let mut board = base_board();
    board.rangers.insert(pins::RANGER_DOWN_PORT, 0);
    board.rangers.insert(pins::RANGER_LEFT_PORT, 40);
    board.rangers.insert(pins::RANGER_RIGHT_PORT, 40);
    board.rangers.insert(pins::RANGER_UP_PORT, NO_READING);
    let mut hub = SensorHub::new(board, ChannelMap::full());

    let mut app = BotService::new(BotConfig::default());
    let mut sink = RecordingSink::new();
    app.start(Duration::ZERO, &mut sink);

    assert!(app.tick(&mut hub, Duration::ZERO, &mut sink).is_none());
    let d = app
        .tick(&mut hub, Duration::from_millis(200), &mut sink)
        .unwrap();
    assert_eq!(d.intent, MovementIntent::MoveForward);

    // Floor drops away under the down ranger.
    let mut board = hub.into_board();
    board.rangers.insert(pins::RANGER_DOWN_PORT, 25);
    let mut hub = SensorHub::new(board, ChannelMap::full());
    let d = app
        .tick(&mut hub, Duration::from_millis(400), &mut sink)
        .unwrap();
    assert_eq!(d.intent, MovementIntent::MoveBack);
}

// ── Trace replay ──────────────────────────────────────────────

#[test]
fn recorded_trace_drives_mode_toggle() {
    let json = r#"[
        {"light": 500},
        {"light": 505},
        {"light": 470, "button": "pressed"},
        {"light": 460, "button": "pressed"},
        {"light": 440},
        {"light": 600, "button": "pressed"}
    ]"#;
    let mut trace = TraceReplayer::from_json(json).unwrap();
    let mut app = BotService::new(BotConfig::default());
    let mut sink = RecordingSink::new();
    app.start(Duration::ZERO, &mut sink);

    let mut modes = Vec::new();
    let mut now = Duration::ZERO;
    while !trace.is_finished() {
        app.tick(&mut trace, now, &mut sink);
        modes.push(app.mode());
        now += Duration::from_millis(200);
    }

    use Mode::{Auto, LightSeek};
    assert_eq!(modes, vec![Auto, Auto, LightSeek, LightSeek, LightSeek, Auto]);
    assert_eq!(app.light_baseline(), 600);
}

// ── Simulated world ───────────────────────────────────────────

#[test]
fn simulated_world_runs_without_stalling() {
    let mut world = SimWorld::new(42);
    let mut app = BotService::new(BotConfig::default());
    let mut sink = RecordingSink::new();
    app.start(Duration::ZERO, &mut sink);

    let period = app.config().tick_period();
    let mut now = Duration::ZERO;
    let mut directives = 0;
    for _ in 0..5_000 {
        let d = app.tick(&mut world, now, &mut sink);
        let intent = d
            .as_ref()
            .map_or(MovementIntent::Hold, |d| d.speed_limited_intent());
        directives += usize::from(d.is_some());
        world.apply(intent);
        now += period;
    }

    assert_eq!(directives, 4_999, "only the first tick bootstraps");
    assert!(app.hazard_flags() <= 0b111);
    assert!(sink.count(|e| matches!(e, ubibot::app::events::AppEvent::HazardDetected(_))) > 0);
    assert!(sink.count(|e| matches!(e, ubibot::app::events::AppEvent::ModeChanged(_))) > 0);
}

// ── Config store ──────────────────────────────────────────────

#[test]
fn stored_config_shapes_service() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonConfigStore::new(dir.path().join("bot.json"));
    assert!(matches!(store.load(), Err(ConfigError::NotFound)));

    let mut cfg = BotConfig::default();
    cfg.height_cm = 40;
    store.save(&cfg).unwrap();

    let mut app = BotService::new(store.load().unwrap());
    let mut sink = RecordingSink::new();
    app.start(Duration::ZERO, &mut sink);

    let step = SensorFrame {
        distance_down: 15,
        light: 500,
        ..SensorFrame::default()
    };
    app.process_frame(step, Duration::ZERO, &mut sink);
    let d = app.process_frame(step, Duration::ZERO, &mut sink).unwrap();
    assert_eq!(d.intent, MovementIntent::MoveForward, "15cm drop is fine for a 40cm bot");
}
