//! Input source trait.

use crate::serial::SerialPort;
use crate::types::GamepadReport;

/// Protocol decoder fed from a serial port.
///
/// This trait abstracts the wire protocol spoken by the attached receiver,
/// allowing different decoders to drive the same bridge loop.
pub trait InputSource {
    /// Consume at most one byte from `port`.
    ///
    /// Returns a freshly decoded report when that byte completed a frame
    /// carrying control data. `now_us` comes from the bridge clock and is
    /// used for inter-byte timing.
    fn poll<P: SerialPort>(&mut self, port: &mut P, now_us: u64) -> Option<GamepadReport>;

    /// Discard any partially received frame.
    fn reset(&mut self);
}
