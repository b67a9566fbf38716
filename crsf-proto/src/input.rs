//! CRSF input source implementation.
//!
//! Feeds receiver bytes through a [`FrameReceiver`] and decodes every
//! completed frame into a [`GamepadReport`].

use gamepad_core::{GamepadReport, InputSource, SerialPort};

use crate::decoder::decode_frame;
use crate::receiver::FrameReceiver;

/// CRSF decoder for a receiver attached to a serial port.
#[derive(Debug, Default)]
pub struct CrsfInput {
    receiver: FrameReceiver,
}

impl CrsfInput {
    /// Create a CRSF input with the standard inter-frame gap.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_receiver(FrameReceiver::new())
    }

    /// Create a CRSF input around a preconfigured receiver.
    #[must_use]
    pub const fn with_receiver(receiver: FrameReceiver) -> Self {
        Self { receiver }
    }

    /// Get a reference to the frame receiver.
    pub fn receiver(&self) -> &FrameReceiver {
        &self.receiver
    }
}

impl InputSource for CrsfInput {
    fn poll<P: SerialPort>(&mut self, port: &mut P, now_us: u64) -> Option<GamepadReport> {
        match port.read_byte_at(now_us) {
            Some((byte, arrival_us)) => self
                .receiver
                .push(byte, arrival_us, decode_frame)
                .flatten(),
            None => {
                self.receiver.expire(now_us);
                None
            }
        }
    }

    fn reset(&mut self) {
        self.receiver.reset();
    }
}
