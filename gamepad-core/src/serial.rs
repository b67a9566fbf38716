//! Byte-level serial port trait and error type.

/// Error type for serial operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Transmit buffer full, byte not queued.
    Full,
}

/// Non-blocking byte pipe.
///
/// Implemented by the physical UART facing the receiver and by the USB
/// virtual serial channel facing the host.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait SerialPort {
    /// Check whether at least one received byte is waiting.
    fn available(&mut self) -> bool;

    /// Take the next received byte, if any.
    fn read_byte(&mut self) -> Option<u8>;

    /// Take the next received byte together with the time it arrived.
    ///
    /// Ports that do not timestamp bytes on arrival report `now_us`.
    fn read_byte_at(&mut self, now_us: u64) -> Option<(u8, u64)> {
        self.read_byte().map(|byte| (byte, now_us))
    }

    /// Check whether [`write_byte`](Self::write_byte) can queue a byte now.
    fn can_write(&mut self) -> bool;

    /// Queue one byte for transmission.
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError>;
}
