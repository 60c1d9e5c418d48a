//! Fuzz target: `BotService::process_frame`
//!
//! Decodes arbitrary bytes into a stream of sensor frames and clock
//! steps, drives them through the service, and asserts the tick contract:
//! no panics, exactly one directive per non-bootstrap tick, hazards always
//! back off, and the history never exceeds its capacity.
//!
//! cargo fuzz run fuzz_tick

#![no_main]

use core::time::Duration;

use libfuzzer_sys::fuzz_target;
use ubibot::app::events::AppEvent;
use ubibot::app::ports::EventSink;
use ubibot::app::service::BotService;
use ubibot::config::BotConfig;
use ubibot::directive::MovementIntent;
use ubibot::sensors::{ButtonState, SensorFrame};

/// Bytes consumed per tick.
const STEP_LEN: usize = 16;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fn word(bytes: &[u8]) -> u32 {
    u32::from(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn decode(step: &[u8]) -> (SensorFrame, Duration) {
    let frame = SensorFrame {
        distance_front: word(&step[0..2]),
        distance_up: word(&step[2..4]),
        distance_down: word(&step[4..6]),
        distance_left: word(&step[6..8]),
        distance_right: word(&step[8..10]),
        light: i32::from(i16::from_le_bytes([step[10], step[11]])),
        button: ButtonState::from(step[12] & 1 == 1),
        vibration: word(&step[13..15]),
    };
    // Up to ~25 s per step so both mode timeouts are reachable.
    (frame, Duration::from_millis(u64::from(step[15]) * 100))
}

fuzz_target!(|data: &[u8]| {
    let mut app = BotService::new(BotConfig::default());
    let mut sink = NullSink;
    app.start(Duration::ZERO, &mut sink);

    let mut now = Duration::ZERO;
    for (i, step) in data.chunks_exact(STEP_LEN).enumerate() {
        let (frame, advance) = decode(step);
        now += advance;

        let directive = app.process_frame(frame, now, &mut sink);
        assert_eq!(directive.is_some(), i >= 1, "bootstrap only on the first tick");
        if let Some(d) = directive {
            if app.hazard_flags() != 0 {
                assert_eq!(d.intent, MovementIntent::MoveBack);
            }
        }
        assert!(app.history().len() <= app.history().capacity());
    }
});
