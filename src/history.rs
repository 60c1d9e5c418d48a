//! Bounded history of sensor frames.
//!
//! Frames are kept in temporal order in a fixed-capacity ring
//! (`heapless::Deque`).  When the ring is full the oldest frame is
//! evicted before the new one is stored, so `len() <= N` always holds
//! and appending never fails.
//!
//! The mode controller reads the two most recent frames for button edge
//! detection; everything older is kept only as a bounded log.

use heapless::Deque;

use crate::error::HistoryError;
use crate::sensors::SensorFrame;

/// Default number of frames retained (200 s at 5 Hz).
pub const HISTORY_LEN: usize = 1000;

/// Fixed-capacity FIFO of [`SensorFrame`]s, oldest first.
pub struct HistoryBuffer<const N: usize = HISTORY_LEN> {
    frames: Deque<SensorFrame, N>,
}

impl<const N: usize> Default for HistoryBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> HistoryBuffer<N> {
    pub const fn new() -> Self {
        Self { frames: Deque::new() }
    }

    /// Append a frame, evicting the oldest one first when full.
    pub fn append(&mut self, frame: SensorFrame) {
        if self.frames.is_full() {
            self.frames.pop_front();
        }
        // Cannot fail: a slot was freed above if the ring was full.
        let _ = self.frames.push_back(frame);
    }

    /// Most recent frame (index −1).
    pub fn latest(&self) -> Result<&SensorFrame, HistoryError> {
        self.frames.back().ok_or(HistoryError::Empty)
    }

    /// Second most recent frame (index −2).
    pub fn previous(&self) -> Result<&SensorFrame, HistoryError> {
        let len = self.frames.len();
        if len < 2 {
            return Err(HistoryError::Insufficient);
        }
        self.get(len - 2).ok_or(HistoryError::Insufficient)
    }

    /// `true` while fewer than two frames are recorded.
    pub fn is_insufficient(&self) -> bool {
        self.frames.len() < 2
    }

    /// Frame at `index`, counted from the oldest retained frame.
    pub fn get(&self, index: usize) -> Option<&SensorFrame> {
        let (head, tail) = self.frames.as_slices();
        if index < head.len() {
            head.get(index)
        } else {
            tail.get(index - head.len())
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Frames from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &SensorFrame> {
        let (head, tail) = self.frames.as_slices();
        head.iter().chain(tail.iter())
    }
}
