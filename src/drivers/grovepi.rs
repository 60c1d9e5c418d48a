//! GrovePi+ sensor board driver.
//!
//! The GrovePi co-processor sits on the I²C bus at
//! [`GROVEPI_I2C_ADDR`](crate::pins::GROVEPI_I2C_ADDR).  Every read is a
//! four-byte command `[cmd, port, 0, 0]`, a settling delay, then a read of
//! the result:
//!
//! | Read        | cmd | Reply                       | Delay  |
//! |-------------|-----|-----------------------------|--------|
//! | digital     | 1   | 1 byte, level               | 10 ms  |
//! | analog      | 3   | 3 bytes, value = b1·256+b2  | 10 ms  |
//! | ultrasonic  | 7   | 3 bytes, cm = b1·256+b2     | 60 ms  |
//!
//! Generic over [`embedded_hal`] I²C and delay traits, so the same driver
//! runs on a Linux host (`linux-embedded-hal`) or against a mock bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::app::ports::RawSensorPort;
use crate::error::SensorError;
use crate::pins::GROVEPI_I2C_ADDR;

const CMD_DIGITAL_READ: u8 = 1;
const CMD_ANALOG_READ: u8 = 3;
const CMD_ULTRASONIC_READ: u8 = 7;

const READ_DELAY_MS: u32 = 10;
/// Covers the echo round trip of the ranger's full reach.
const ULTRASONIC_DELAY_MS: u32 = 60;

/// Digital ports D2..=D8.
const DIGITAL_PORTS: core::ops::RangeInclusive<u8> = 2..=8;
/// Analog ports A0..=A2.
const ANALOG_PORTS: core::ops::RangeInclusive<u8> = 0..=2;

pub struct GrovePi<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> GrovePi<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Release the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, cmd: u8, port: u8, settle_ms: u32) -> Result<(), SensorError> {
        self.i2c
            .write(GROVEPI_I2C_ADDR, &[cmd, port, 0, 0])
            .map_err(|_| SensorError::BusFailed)?;
        self.delay.delay_ms(settle_ms);
        Ok(())
    }

    fn read_word(&mut self) -> Result<u16, SensorError> {
        let mut buf = [0u8; 3];
        self.i2c
            .read(GROVEPI_I2C_ADDR, &mut buf)
            .map_err(|_| SensorError::BusFailed)?;
        Ok(u16::from_be_bytes([buf[1], buf[2]]))
    }
}

impl<I2C: I2c, D: DelayNs> RawSensorPort for GrovePi<I2C, D> {
    fn read_ranger_cm(&mut self, port: u8) -> Result<u32, SensorError> {
        if !DIGITAL_PORTS.contains(&port) {
            return Err(SensorError::Unwired);
        }
        self.command(CMD_ULTRASONIC_READ, port, ULTRASONIC_DELAY_MS)?;
        let cm = self.read_word()?;
        debug!("GrovePi: ranger D{} = {}cm", port, cm);
        Ok(u32::from(cm))
    }

    fn read_analog(&mut self, port: u8) -> Result<u16, SensorError> {
        if !ANALOG_PORTS.contains(&port) {
            return Err(SensorError::Unwired);
        }
        self.command(CMD_ANALOG_READ, port, READ_DELAY_MS)?;
        self.read_word()
    }

    fn read_digital(&mut self, port: u8) -> Result<bool, SensorError> {
        if !DIGITAL_PORTS.contains(&port) {
            return Err(SensorError::Unwired);
        }
        self.command(CMD_DIGITAL_READ, port, READ_DELAY_MS)?;
        let mut level = [0u8; 1];
        self.i2c
            .read(GROVEPI_I2C_ADDR, &mut level)
            .map_err(|_| SensorError::BusFailed)?;
        Ok(level[0] != 0)
    }
}
