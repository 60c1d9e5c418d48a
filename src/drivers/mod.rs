//! Device drivers for the Grove hardware, written against `embedded-hal`.

pub mod grovepi;
pub mod lcd;

#[cfg(test)]
mod mock_bus;
