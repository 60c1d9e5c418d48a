//! GrovePi port assignments for the UbiBot chassis.
//!
//! Single source of truth: the default [`ChannelMap`](crate::sensors::hub::ChannelMap)
//! and the drivers reference this module rather than hard-coding port numbers.

// ---------------------------------------------------------------------------
// I²C bus
// ---------------------------------------------------------------------------

/// GrovePi co-processor address.
pub const GROVEPI_I2C_ADDR: u8 = 0x04;
/// Grove RGB LCD, character controller.
pub const LCD_TEXT_I2C_ADDR: u8 = 0x3e;
/// Grove RGB LCD, backlight controller.
pub const LCD_RGB_I2C_ADDR: u8 = 0x62;

// ---------------------------------------------------------------------------
// Ultrasonic rangers (digital ports)
// ---------------------------------------------------------------------------

/// Forward-facing ranger.  The only ranger fitted on the base chassis.
pub const RANGER_FRONT_PORT: u8 = 2;
/// Upward-facing ranger (optional).
pub const RANGER_UP_PORT: u8 = 3;
/// Floor-facing ranger (optional).
pub const RANGER_DOWN_PORT: u8 = 4;
/// Left-facing ranger (optional).
pub const RANGER_LEFT_PORT: u8 = 5;
/// Right-facing ranger (optional).
pub const RANGER_RIGHT_PORT: u8 = 6;

// ---------------------------------------------------------------------------
// Button (digital port)
// ---------------------------------------------------------------------------

/// Momentary mode-toggle button.  HIGH = pressed.
pub const BUTTON_PORT: u8 = 8;

// ---------------------------------------------------------------------------
// Analog sensors
// ---------------------------------------------------------------------------

/// Grove light sensor (A0).
pub const LIGHT_PORT: u8 = 0;
/// Grove piezo vibration sensor (A1).
pub const VIBRATION_PORT: u8 = 1;
