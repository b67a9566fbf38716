//! Output sink trait and error types.

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Endpoint busy.
    Busy,
}

/// HID report sink.
///
/// This trait abstracts the destination for gamepad reports, enabling
/// different output methods (USB HID, BLE HID, test capture, etc.).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait OutputSink {
    /// Check if the endpoint can accept a report right now.
    fn is_ready(&self) -> bool;

    /// Send one input report. Must not block waiting for the host.
    fn send_report(&mut self, report_id: u8, report: &[u8]) -> Result<(), OutputError>;
}
