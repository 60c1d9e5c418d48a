//! Grove RGB LCD (16×2 character display) driver.
//!
//! Two I²C devices: the character controller at
//! [`LCD_TEXT_I2C_ADDR`](crate::pins::LCD_TEXT_I2C_ADDR) (register `0x80`
//! for commands, `0x40` for data) and the backlight controller at
//! [`LCD_RGB_I2C_ADDR`](crate::pins::LCD_RGB_I2C_ADDR).
//!
//! [`show`](DisplayPort::show) clears the screen and writes the text,
//! wrapping at 16 columns and breaking on `'\n'`.  Anything past the
//! second row is dropped.  Characters outside printable ASCII are shown
//! as `?`.  Text already on screen is not rewritten.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::DisplayPort;
use crate::error::{Error, Result};
use crate::pins::{LCD_RGB_I2C_ADDR, LCD_TEXT_I2C_ADDR};

pub const COLUMNS: usize = 16;
pub const ROWS: usize = 2;

const REG_COMMAND: u8 = 0x80;
const REG_DATA: u8 = 0x40;

const CMD_CLEAR: u8 = 0x01;
const CMD_DISPLAY_ON_NO_CURSOR: u8 = 0x08 | 0x04;
const CMD_TWO_LINES: u8 = 0x28;
const CMD_SECOND_ROW: u8 = 0xc0;

/// Controller settling time after clear / function set.
const SETTLE_MS: u32 = 50;

/// Backlight colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

pub struct GroveLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    shown: String,
}

impl<I2C: I2c, D: DelayNs> GroveLcd<I2C, D> {
    /// Take the bus and light the backlight white.
    pub fn new(i2c: I2C, delay: D) -> Result<Self> {
        let mut lcd = Self {
            i2c,
            delay,
            shown: String::new(),
        };
        lcd.set_backlight(Rgb::WHITE)?;
        Ok(lcd)
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn set_backlight(&mut self, Rgb(r, g, b): Rgb) -> Result<()> {
        for (reg, value) in [(0x00, 0x00), (0x01, 0x00), (0x08, 0xaa), (0x04, r), (0x03, g), (0x02, b)] {
            self.i2c
                .write(LCD_RGB_I2C_ADDR, &[reg, value])
                .map_err(|_| Error::Display("backlight write failed"))?;
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.i2c
            .write(LCD_TEXT_I2C_ADDR, &[REG_COMMAND, cmd])
            .map_err(|_| Error::Display("lcd command failed"))
    }

    fn data(&mut self, byte: u8) -> Result<()> {
        self.i2c
            .write(LCD_TEXT_I2C_ADDR, &[REG_DATA, byte])
            .map_err(|_| Error::Display("lcd data write failed"))
    }
}

impl<I2C: I2c, D: DelayNs> DisplayPort for GroveLcd<I2C, D> {
    fn show(&mut self, text: &str) -> Result<()> {
        if text == self.shown {
            return Ok(());
        }
        // A failed write leaves the screen in an unknown state.
        self.shown.clear();
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(SETTLE_MS);
        self.command(CMD_DISPLAY_ON_NO_CURSOR)?;
        self.command(CMD_TWO_LINES)?;
        self.delay.delay_ms(SETTLE_MS);

        let mut row = 0;
        let mut col = 0;
        for c in text.chars() {
            if c == '\n' || col == COLUMNS {
                row += 1;
                if row == ROWS {
                    break;
                }
                col = 0;
                self.command(CMD_SECOND_ROW)?;
                if c == '\n' {
                    continue;
                }
            }
            let byte = if c == ' ' || c.is_ascii_graphic() { c as u8 } else { b'?' };
            self.data(byte)?;
            col += 1;
        }
        self.shown.push_str(text);
        Ok(())
    }
}
