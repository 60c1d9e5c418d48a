//! Behavior selection for hazard-free ticks.
//!
//! Once the hazard detector has cleared the tick, the directive depends
//! only on the current mode:
//!
//! | Mode      | Intent                                    | Status                  |
//! |-----------|-------------------------------------------|-------------------------|
//! | Auto      | forward inside the light window, else back | window + reading if out |
//! | LightSeek | forward, tracking the darkest reading     | reading vs. baseline    |
//! | Reset     | back                                      | returning to start      |
//!
//! Independently of the mode, an obstacle within the warning distance
//! adds a "move slowly" line ahead of the mode's line.  The advisory never
//! changes the intent.

use crate::config::BotConfig;
use crate::directive::{Directive, MovementIntent, StatusEvent};
use crate::fsm::Mode;
use crate::hazard::is_near_obstacle_ahead;
use crate::sensors::SensorFrame;

/// Accepted light window `[low, high]` around `baseline`, inclusive.
pub fn light_window(baseline: i32, range: i32) -> (i32, i32) {
    (baseline.saturating_sub(range), baseline.saturating_add(range))
}

/// Produce the directive for `mode`.  In LightSeek the baseline follows
/// the reading down whenever it is darker.
pub fn select(
    mode: Mode,
    frame: &SensorFrame,
    light_baseline: &mut i32,
    config: &BotConfig,
) -> Directive {
    let mut directive = Directive::new(MovementIntent::Hold);

    if is_near_obstacle_ahead(frame, config.warning_distance_cm) {
        directive.push(StatusEvent::ObstacleAhead {
            distance_cm: frame.distance_front,
        });
    }

    directive.intent = match mode {
        Mode::Auto => {
            let (low, high) = light_window(*light_baseline, config.light_range);
            if (low..=high).contains(&frame.light) {
                directive.push(StatusEvent::Cruising);
                MovementIntent::MoveForward
            } else {
                directive.push(StatusEvent::LightOutOfRange {
                    low,
                    high,
                    current: frame.light,
                });
                MovementIntent::MoveBack
            }
        }
        Mode::LightSeek => {
            if frame.light < *light_baseline {
                *light_baseline = frame.light;
            }
            directive.push(StatusEvent::SeekingDarkness {
                current: frame.light,
                baseline: *light_baseline,
            });
            MovementIntent::MoveForward
        }
        Mode::Reset => {
            // No odometry: the intent is all this mode can offer.
            directive.push(StatusEvent::ReturningToStart);
            MovementIntent::MoveBack
        }
    };
    directive
}
