//! End-to-end tests for the BotService tick pipeline:
//! sensors → history → modes → hazards → behavior → directive.

use std::time::Duration;

use ubibot::app::commands::AppCommand;
use ubibot::app::events::AppEvent;
use ubibot::app::ports::{ClockPort, DisplayPort};
use ubibot::app::service::BotService;
use ubibot::config::BotConfig;
use ubibot::directive::{MovementIntent, StatusEvent};
use ubibot::fsm::{Mode, TransitionCause};
use ubibot::hazard::Hazard;
use ubibot::sensors::SensorFrame;

use crate::mock_hw::{ManualClock, RecordingDisplay, RecordingSink, ScriptedSensors, lit, pressed};

struct Rig {
    app: BotService,
    sensors: ScriptedSensors,
    clock: ManualClock,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(BotConfig::default())
    }

    fn with_config(config: BotConfig) -> Self {
        let mut app = BotService::new(config);
        let clock = ManualClock::default();
        let mut sink = RecordingSink::new();
        app.start(clock.now(), &mut sink);
        Self {
            app,
            sensors: ScriptedSensors::new([]),
            clock,
            sink,
        }
    }

    /// Feed one frame at the current clock time.
    fn feed(&mut self, frame: SensorFrame) -> Option<ubibot::directive::Directive> {
        self.sensors.push(frame);
        self.app
            .tick(&mut self.sensors, self.clock.now(), &mut self.sink)
    }

    /// Feed two frames so the history is past bootstrap.
    fn warmed(light: i32) -> Self {
        let mut rig = Self::new();
        assert!(rig.feed(lit(light)).is_none());
        assert!(rig.feed(lit(light)).is_some());
        rig
    }
}

// ── Bootstrap ─────────────────────────────────────────────────

#[test]
fn fresh_robot_bootstraps_then_moves_forward() {
    let mut rig = Rig::new();
    assert_eq!(rig.app.mode(), Mode::Auto);

    assert!(rig.feed(lit(500)).is_none(), "no directive on first frame");
    assert_eq!(rig.app.light_baseline(), 500);

    let d = rig.feed(lit(520)).expect("second frame yields a directive");
    assert_eq!(d.intent, MovementIntent::MoveForward);
    assert_eq!(d.status.as_slice(), &[StatusEvent::Cruising]);
}

#[test]
fn bootstrap_tick_ignores_hazards_and_button() {
    let mut rig = Rig::new();
    let dangerous = SensorFrame {
        distance_down: 50,
        vibration: 5000,
        ..pressed(500)
    };
    assert!(rig.feed(dangerous).is_none());
    assert_eq!(rig.app.mode(), Mode::Auto);
    assert_eq!(rig.app.hazard_flags(), 0);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::ModeChanged(_))), 0);
}

// ── Hazards ───────────────────────────────────────────────────

#[test]
fn falling_overrides_light_and_mode() {
    let mut rig = Rig::warmed(500);
    let d = rig
        .feed(SensorFrame {
            distance_down: 8,
            ..lit(520)
        })
        .unwrap();
    assert_eq!(d.intent, MovementIntent::MoveBack);
    assert_eq!(d.status.as_slice(), &[StatusEvent::Falling]);
    assert_eq!(rig.app.hazard_flags(), Hazard::Falling.mask());
}

#[test]
fn down_reading_at_half_height_is_not_falling() {
    let mut rig = Rig::warmed(500);
    let d = rig
        .feed(SensorFrame {
            distance_down: 5,
            ..lit(500)
        })
        .unwrap();
    assert_eq!(d.intent, MovementIntent::MoveForward);
}

#[test]
fn falling_beats_collision_beats_blocked() {
    let mut rig = Rig::warmed(500);
    let everything = SensorFrame {
        distance_down: 30,
        vibration: 2000,
        distance_left: 3,
        distance_right: 3,
        ..lit(500)
    };
    let d = rig.feed(everything).unwrap();
    assert_eq!(d.status.as_slice(), &[StatusEvent::Falling]);

    let d = rig
        .feed(SensorFrame {
            distance_down: 0,
            ..everything
        })
        .unwrap();
    assert_eq!(d.status.as_slice(), &[StatusEvent::Collision]);

    let d = rig
        .feed(SensorFrame {
            distance_down: 0,
            vibration: 0,
            ..everything
        })
        .unwrap();
    assert_eq!(d.intent, MovementIntent::MoveBack);
    assert_eq!(d.status.as_slice(), &[StatusEvent::CannotPass]);
}

#[test]
fn hazard_events_fire_on_edges_only() {
    let mut rig = Rig::warmed(500);
    let knock = SensorFrame {
        vibration: 1001,
        ..lit(500)
    };
    rig.feed(knock);
    rig.feed(knock);
    rig.feed(lit(500));
    rig.feed(lit(500));

    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::HazardDetected(_))), 1);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::HazardsCleared)), 1);
}

#[test]
fn proximity_advisory_keeps_mode_intent() {
    let mut rig = Rig::warmed(500);
    let d = rig
        .feed(SensorFrame {
            distance_front: 10,
            ..lit(500)
        })
        .unwrap();
    assert_eq!(d.intent, MovementIntent::MoveForward);
    assert_eq!(d.speed_limited_intent(), MovementIntent::SlowDown);
    assert_eq!(
        d.status.as_slice(),
        &[
            StatusEvent::ObstacleAhead { distance_cm: 10 },
            StatusEvent::Cruising
        ]
    );

    let d = rig
        .feed(SensorFrame {
            distance_front: 11,
            ..lit(500)
        })
        .unwrap();
    assert!(!d.has_status(|e| matches!(e, StatusEvent::ObstacleAhead { .. })));
}

// ── Auto light window ─────────────────────────────────────────

#[test]
fn auto_window_boundary_is_inclusive() {
    let mut rig = Rig::warmed(500);
    assert_eq!(rig.feed(lit(550)).unwrap().intent, MovementIntent::MoveForward);
    assert_eq!(rig.feed(lit(450)).unwrap().intent, MovementIntent::MoveForward);

    let d = rig.feed(lit(551)).unwrap();
    assert_eq!(d.intent, MovementIntent::MoveBack);
    assert_eq!(
        d.status.as_slice(),
        &[StatusEvent::LightOutOfRange {
            low: 450,
            high: 550,
            current: 551
        }]
    );
    assert_eq!(rig.feed(lit(449)).unwrap().intent, MovementIntent::MoveBack);
    assert_eq!(rig.app.light_baseline(), 500);
}

// ── Mode transitions ──────────────────────────────────────────

#[test]
fn button_edge_enters_light_seek() {
    let mut rig = Rig::warmed(500);
    rig.clock.set_secs(42);

    let d = rig.feed(pressed(430)).unwrap();
    assert_eq!(rig.app.mode(), Mode::LightSeek);
    assert_eq!(rig.app.light_baseline(), 430);
    assert_eq!(rig.app.mode_clock(), Duration::from_secs(42));
    assert_eq!(d.intent, MovementIntent::MoveForward);
    assert_eq!(
        d.status[0],
        StatusEvent::ModeChanged {
            to: Mode::LightSeek,
            cause: TransitionCause::Button
        }
    );

    // Holding the button does not toggle again.
    rig.feed(pressed(430));
    assert_eq!(rig.app.mode(), Mode::LightSeek);
}

#[test]
fn light_seek_tracks_darkest_reading() {
    let mut rig = Rig::warmed(500);
    rig.feed(pressed(500));
    assert_eq!(rig.app.mode(), Mode::LightSeek);

    for (light, expected) in [(480, 480), (490, 480), (300, 300), (900, 300)] {
        let d = rig.feed(lit(light)).unwrap();
        assert_eq!(d.intent, MovementIntent::MoveForward);
        assert_eq!(rig.app.light_baseline(), expected, "after light {light}");
    }
}

#[test]
fn light_seek_times_out_back_to_auto() {
    let mut rig = Rig::warmed(500);
    rig.clock.set_secs(10);
    rig.feed(pressed(400));
    assert_eq!(rig.app.mode(), Mode::LightSeek);

    rig.clock.set_secs(69);
    rig.feed(lit(380));
    assert_eq!(rig.app.mode(), Mode::LightSeek);

    rig.clock.set_secs(71);
    let d = rig.feed(lit(610)).unwrap();
    assert_eq!(rig.app.mode(), Mode::Auto);
    assert_eq!(rig.app.light_baseline(), 610);
    assert_eq!(rig.app.mode_clock(), Duration::from_secs(71));
    assert_eq!(
        d.status[0],
        StatusEvent::ModeChanged {
            to: Mode::Auto,
            cause: TransitionCause::Timeout
        }
    );
    // The fresh baseline makes the current reading in-window.
    assert_eq!(d.intent, MovementIntent::MoveForward);
}

#[test]
fn auto_times_out_into_reset_and_button_resumes() {
    let mut rig = Rig::warmed(500);
    rig.clock.set_secs(600);
    let d = rig.feed(lit(500)).unwrap();
    assert_eq!(rig.app.mode(), Mode::Reset);
    assert_eq!(d.intent, MovementIntent::MoveBack);
    assert!(d.has_status(|e| *e == StatusEvent::ReturningToStart));

    rig.clock.set_secs(100_000);
    rig.feed(lit(500));
    assert_eq!(rig.app.mode(), Mode::Reset, "reset never times out");

    rig.feed(pressed(520));
    assert_eq!(rig.app.mode(), Mode::Auto);
    assert_eq!(rig.app.light_baseline(), 520);
}

#[test]
fn timeout_and_button_on_same_tick_fire_once() {
    let mut rig = Rig::warmed(500);
    rig.feed(pressed(500));
    rig.feed(lit(500));
    assert_eq!(rig.app.mode(), Mode::LightSeek);

    rig.clock.set_secs(60);
    let d = rig.feed(pressed(450)).unwrap();
    assert_eq!(rig.app.mode(), Mode::Auto);
    assert_eq!(
        d.status[0],
        StatusEvent::ModeChanged {
            to: Mode::Auto,
            cause: TransitionCause::Timeout
        }
    );
    let changes = rig.sink.count(|e| matches!(e, AppEvent::ModeChanged(_)));
    assert_eq!(changes, 2, "one for the button, one for the timeout");
}

#[test]
fn hazard_directive_still_reports_mode_change() {
    let mut rig = Rig::warmed(500);
    let d = rig
        .feed(SensorFrame {
            distance_down: 40,
            ..pressed(500)
        })
        .unwrap();
    assert_eq!(rig.app.mode(), Mode::LightSeek);
    assert_eq!(d.intent, MovementIntent::MoveBack);
    assert_eq!(d.status.len(), 2);
    assert_eq!(d.status[1], StatusEvent::Falling);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn force_mode_command() {
    let mut rig = Rig::warmed(500);
    rig.clock.set_secs(5);
    rig.feed(lit(470));

    rig.app
        .handle_command(AppCommand::ForceMode(Mode::LightSeek), &mut rig.sink)
        .unwrap();
    assert_eq!(rig.app.mode(), Mode::LightSeek);
    assert_eq!(rig.app.light_baseline(), 470);
    assert_eq!(rig.app.mode_clock(), Duration::from_secs(5));
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ModeChanged(c) if c.cause == TransitionCause::Forced
    )));
}

#[test]
fn update_config_changes_thresholds() {
    let mut rig = Rig::warmed(500);
    let mut wider = BotConfig::default();
    wider.light_range = 100;
    rig.app
        .handle_command(AppCommand::UpdateConfig(wider), &mut rig.sink)
        .unwrap();
    assert_eq!(rig.feed(lit(590)).unwrap().intent, MovementIntent::MoveForward);
}

// ── Telemetry and history ─────────────────────────────────────

#[test]
fn telemetry_reflects_state() {
    let mut rig = Rig::warmed(500);
    rig.clock.set_secs(3);
    rig.feed(lit(505));

    let t = rig.app.build_telemetry();
    assert_eq!(t.mode, Mode::Auto);
    assert_eq!(t.history_len, 3);
    assert_eq!(t.ticks, 3);
    assert_eq!(t.light_baseline, 500);
    assert_eq!(t.time_in_mode, Duration::from_secs(3));
    assert_eq!(t.frame.map(|f| f.light), Some(505));
}

#[test]
fn history_is_bounded_over_long_runs() {
    let mut rig = Rig::new();
    let capacity = rig.app.history().capacity();
    for i in 0..capacity + 250 {
        rig.feed(lit(500 + (i % 20) as i32));
    }
    assert_eq!(rig.app.history().len(), capacity);
    assert_eq!(rig.sensors.reads, capacity + 250);
}

#[test]
fn status_text_drives_display() {
    let mut rig = Rig::warmed(500);
    let mut display = RecordingDisplay::default();

    let d = rig.feed(pressed(480)).unwrap();
    display.show(&d.status_text()).unwrap();
    assert_eq!(
        display.shown,
        vec!["Mode now LIGHT. Seeking dark: light 480, lowest 480.".to_owned()]
    );
}
