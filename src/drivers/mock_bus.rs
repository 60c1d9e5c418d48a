//! In-memory I²C bus and delay for driver tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Records every write; answers reads from a queue of canned replies.
/// A read with no reply queued fails like a NACKed transfer.
#[derive(Default)]
pub struct MockBus {
    pub writes: Vec<(u8, Vec<u8>)>,
    replies: VecDeque<Vec<u8>>,
}

impl MockBus {
    pub fn with_replies(replies: &[&[u8]]) -> Self {
        Self {
            writes: Vec::new(),
            replies: replies.iter().map(|r| r.to_vec()).collect(),
        }
    }
}

impl ErrorType for MockBus {
    type Error = ErrorKind;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                Operation::Read(buf) => {
                    let reply = self.replies.pop_front().ok_or(ErrorKind::Other)?;
                    let n = buf.len().min(reply.len());
                    buf[..n].copy_from_slice(&reply[..n]);
                }
            }
        }
        Ok(())
    }
}

/// Accumulates requested delays instead of sleeping.
#[derive(Default)]
pub struct NoDelay {
    total_ns: u64,
}

impl NoDelay {
    pub fn total_ms(&self) -> u32 {
        (self.total_ns / 1_000_000) as u32
    }
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
