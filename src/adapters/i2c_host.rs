//! Linux I²C host adapter.
//!
//! Opens the GrovePi board and the RGB LCD on an `i2c-dev` character
//! device (`/dev/i2c-1` on a Raspberry Pi).  Each device gets its own
//! handle on the same bus; the kernel serialises the transfers.

use std::path::Path;

use linux_embedded_hal::{Delay, I2cdev};
use log::{info, warn};

use crate::drivers::grovepi::GrovePi;
use crate::drivers::lcd::GroveLcd;
use crate::error::{Error, Result, SensorError};
use crate::sensors::hub::{ChannelMap, SensorHub};

/// Sensor hub reading a GrovePi board over Linux I²C.
pub type BoardHub = SensorHub<GrovePi<I2cdev, Delay>>;

/// Grove RGB LCD over Linux I²C.
pub type BoardLcd = GroveLcd<I2cdev, Delay>;

pub fn open_board(dev: &Path, channels: ChannelMap) -> Result<BoardHub> {
    let i2c = I2cdev::new(dev).map_err(|e| {
        warn!("GrovePi: cannot open {}: {}", dev.display(), e);
        Error::Sensor(SensorError::BusFailed)
    })?;
    info!("GrovePi: board on {}", dev.display());
    Ok(SensorHub::new(GrovePi::new(i2c, Delay), channels))
}

pub fn open_lcd(dev: &Path) -> Result<BoardLcd> {
    let i2c = I2cdev::new(dev).map_err(|e| {
        warn!("LCD: cannot open {}: {}", dev.display(), e);
        Error::Display("lcd bus unavailable")
    })?;
    let lcd = GroveLcd::new(i2c, Delay)?;
    info!("LCD: display on {}", dev.display());
    Ok(lcd)
}
