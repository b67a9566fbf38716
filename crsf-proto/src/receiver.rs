//! Byte-at-a-time CRSF frame assembly.
//!
//! Framing is length-prefixed: the second byte of a frame counts the bytes
//! that follow it. There is no sync byte to hunt for, so the receiver relies
//! on the idle gap between frames to stay aligned: whenever more than
//! [`FRAME_GAP_US`] pass between two bytes, whatever was buffered is dropped
//! and the next byte starts a new frame.

use heapless::Vec;

use crate::protocol::{CRSF_MAX_FRAME_SIZE, LENGTH_OFFSET};

/// Buffer capacity: the largest legal frame plus slack for a bad length byte.
pub const FRAME_BUFFER_SIZE: usize = CRSF_MAX_FRAME_SIZE + 3;

/// Inter-byte silence that ends a partial frame.
pub const FRAME_GAP_US: u64 = 800;

/// Why buffered bytes were thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Discard {
    /// The line went quiet mid-frame.
    Gap,
    /// The buffer filled before the declared length was reached.
    Overflow,
}

/// Accumulates bytes into frames.
#[derive(Debug)]
pub struct FrameReceiver {
    buffer: Vec<u8, FRAME_BUFFER_SIZE>,
    frame_len: usize,
    last_byte_us: u64,
    gap_us: u64,
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReceiver {
    /// Create an empty receiver with the standard 800 µs gap.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_gap_us(FRAME_GAP_US)
    }

    /// Create an empty receiver with a custom inter-byte gap.
    #[must_use]
    pub const fn with_gap_us(gap_us: u64) -> Self {
        Self {
            buffer: Vec::new(),
            frame_len: 0,
            last_byte_us: 0,
            gap_us,
        }
    }

    /// Bytes buffered for the frame in progress.
    #[inline]
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of bytes buffered for the frame in progress.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Drop any partial frame.
    #[inline]
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.frame_len = 0;
    }

    /// Drop a partial frame if the line has been quiet for longer than the gap.
    ///
    /// Call when no byte is available. Returns `true` if a frame was dropped.
    pub fn expire(&mut self, now_us: u64) -> bool {
        if self.is_stale(now_us) {
            self.discard(Discard::Gap);
            return true;
        }
        false
    }

    /// Append one byte received at `now_us`.
    ///
    /// When the byte completes a frame, `on_frame` runs on the full frame
    /// before the buffer is reset, and its result is returned.
    pub fn push<R>(
        &mut self,
        byte: u8,
        now_us: u64,
        on_frame: impl FnOnce(&[u8]) -> R,
    ) -> Option<R> {
        // A byte arriving after a long silence starts a new frame
        if self.is_stale(now_us) {
            self.discard(Discard::Gap);
        }
        self.last_byte_us = now_us;

        if self.buffer.len() == LENGTH_OFFSET {
            self.frame_len = byte as usize;
        }

        if self.buffer.push(byte).is_err() {
            self.discard(Discard::Overflow);
            return None;
        }

        let pos = self.buffer.len();
        if pos > LENGTH_OFFSET && pos >= self.frame_len + 2 {
            let result = on_frame(&self.buffer);
            self.reset();
            return Some(result);
        }

        if self.buffer.is_full() {
            self.discard(Discard::Overflow);
        }
        None
    }

    fn is_stale(&self, now_us: u64) -> bool {
        !self.buffer.is_empty() && now_us.saturating_sub(self.last_byte_us) > self.gap_us
    }

    fn discard(&mut self, reason: Discard) {
        debug!(
            "Discarding {} buffered bytes: {:?}",
            self.buffer.len(),
            reason
        );
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec as StdVec;

    /// Feed bytes `step_us` apart starting at `start_us`, collecting frames.
    fn feed(
        rx: &mut FrameReceiver,
        bytes: &[u8],
        start_us: u64,
        step_us: u64,
    ) -> StdVec<StdVec<u8>> {
        let mut frames = StdVec::new();
        for (i, &b) in bytes.iter().enumerate() {
            if let Some(frame) = rx.push(b, start_us + i as u64 * step_us, |f| f.to_vec()) {
                frames.push(frame);
            }
        }
        frames
    }

    #[test]
    fn test_completes_at_declared_length() {
        let mut rx = FrameReceiver::new();
        let frame = [0xC8, 0x04, 0x16, 0xAA, 0xBB, 0xCC];

        let frames = feed(&mut rx, &frame[..5], 0, 40);
        assert!(frames.is_empty());
        assert_eq!(rx.position(), 5);

        let done = rx.push(frame[5], 200, |f| f.to_vec());
        assert_eq!(done, Some(frame.to_vec()));
        assert_eq!(rx.position(), 0);
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut rx = FrameReceiver::new();
        let bytes = [0xC8, 0x02, 0x16, 0x00, 0xEA, 0x03, 0x14, 0x01, 0x02];
        let frames = feed(&mut rx, &bytes, 0, 24);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], [0xC8, 0x02, 0x16, 0x00].to_vec());
        assert_eq!(frames[1], [0xEA, 0x03, 0x14, 0x01, 0x02].to_vec());
    }

    #[test]
    fn test_zero_length_completes_after_two_bytes() {
        let mut rx = FrameReceiver::new();
        assert_eq!(rx.push(0xC8, 0, |f| f.len()), None);
        assert_eq!(rx.push(0x00, 10, |f| f.len()), Some(2));
    }

    #[test]
    fn test_expire_drops_partial_frame_after_gap() {
        let mut rx = FrameReceiver::new();
        feed(&mut rx, &[0xC8, 0x18, 0x16], 0, 10);

        assert!(!rx.expire(20 + 800));
        assert_eq!(rx.position(), 3);
        assert!(rx.expire(20 + 801));
        assert_eq!(rx.position(), 0);
    }

    #[test]
    fn test_expire_on_empty_buffer_is_noop() {
        let mut rx = FrameReceiver::new();
        assert!(!rx.expire(1_000_000));
    }

    #[test]
    fn test_late_byte_starts_new_frame() {
        let mut rx = FrameReceiver::new();
        feed(&mut rx, &[0xC8, 0x18, 0x16, 0x00], 0, 10);

        // Next frame begins after a gap without an intervening empty poll
        let frames = feed(&mut rx, &[0xC8, 0x02, 0x16, 0x00], 1_000, 10);
        assert_eq!(frames, [[0xC8, 0x02, 0x16, 0x00].to_vec()].to_vec());
    }

    #[test]
    fn test_gap_resets_on_every_byte() {
        let mut rx = FrameReceiver::new();
        let frame = [0xC8, 0x06, 0x16, 1, 2, 3, 4, 5];
        // Each byte 700 µs apart: the frame spans 4.9 ms but never gaps
        let frames = feed(&mut rx, &frame, 0, 700);
        assert_eq!(frames, [frame.to_vec()].to_vec());
    }

    #[test]
    fn test_oversized_length_overflows_and_resets() {
        let mut rx = FrameReceiver::new();
        let mut bytes = [0x55u8; FRAME_BUFFER_SIZE];
        bytes[0] = 0xC8;
        bytes[1] = 0xFF;

        let frames = feed(&mut rx, &bytes[..FRAME_BUFFER_SIZE - 1], 0, 1);
        assert!(frames.is_empty());
        assert_eq!(rx.position(), FRAME_BUFFER_SIZE - 1);

        assert_eq!(rx.push(0x55, 100, |f| f.len()), None);
        assert_eq!(rx.position(), 0);

        // Receiver is usable again straight away
        let frames = feed(&mut rx, &[0xC8, 0x01, 0x16], 200, 1);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_largest_legal_frame_fits() {
        let mut rx = FrameReceiver::new();
        let mut frame = [0u8; CRSF_MAX_FRAME_SIZE];
        frame[0] = 0xC8;
        frame[1] = (CRSF_MAX_FRAME_SIZE - 2) as u8;
        let frames = feed(&mut rx, &frame, 0, 1);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), CRSF_MAX_FRAME_SIZE);
    }

    #[test]
    fn test_custom_gap() {
        let mut rx = FrameReceiver::with_gap_us(100);
        feed(&mut rx, &[0xC8, 0x18], 0, 10);
        assert!(rx.expire(111));
    }
}
