//! USB HID gamepad output implementation.
//!
//! The bridge loop never awaits, so reports cross to the HID writer task
//! through a [`HidEndpoint`]: [`HidSink`] stores the latest report and
//! marks the endpoint busy, the writer task transmits it and clears the
//! busy flag once the host has taken the packet.

use defmt::info;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::{Builder, Handler};
use gamepad_core::{
    GamepadReport, OutputError, OutputSink, POLL_INTERVAL_MS, REPORT_DESCRIPTOR, REPORT_ID,
};
use portable_atomic::{AtomicBool, Ordering};

/// Report bytes as sent on the wire.
pub type ReportBytes = [u8; GamepadReport::SIZE];

/// HID interrupt IN writer for one gamepad report.
pub type GamepadHidWriter<'d> = HidWriter<'d, Driver<'d, USB>, { GamepadReport::SIZE }>;

/// Shared state between the bridge loop and the HID writer task.
pub struct HidEndpoint {
    report: Signal<CriticalSectionRawMutex, ReportBytes>,
    configured: AtomicBool,
    busy: AtomicBool,
}

impl Default for HidEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl HidEndpoint {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report: Signal::new(),
            configured: AtomicBool::new(false),
            busy: AtomicBool::new(false),
        }
    }

    /// Record whether the host has configured the device.
    pub fn set_configured(&self, configured: bool) {
        self.configured.store(configured, Ordering::Release);
        if !configured {
            self.report.reset();
            self.busy.store(false, Ordering::Release);
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    /// Wait for the next report to transmit.
    pub async fn next_report(&self) -> ReportBytes {
        self.report.wait().await
    }

    /// Mark the in-flight report as delivered (or abandoned).
    pub fn report_done(&self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// [`OutputSink`] that hands reports to the HID writer task.
#[derive(Clone, Copy)]
pub struct HidSink {
    endpoint: &'static HidEndpoint,
}

impl HidSink {
    #[must_use]
    pub const fn new(endpoint: &'static HidEndpoint) -> Self {
        Self { endpoint }
    }
}

impl OutputSink for HidSink {
    fn is_ready(&self) -> bool {
        self.endpoint.is_configured() && !self.endpoint.busy.load(Ordering::Acquire)
    }

    fn send_report(&mut self, report_id: u8, report: &[u8]) -> Result<(), OutputError> {
        // Descriptor declares no report IDs, so only ID 0 goes out unprefixed
        if report_id != REPORT_ID {
            return Err(OutputError::Io);
        }
        let bytes: ReportBytes = report.try_into().map_err(|_| OutputError::Io)?;

        if !self.endpoint.is_configured() {
            return Err(OutputError::NotReady);
        }
        if self.endpoint.busy.swap(true, Ordering::AcqRel) {
            return Err(OutputError::Busy);
        }

        self.endpoint.report.signal(bytes);
        Ok(())
    }
}

/// Tracks USB configuration state for the HID endpoint.
pub struct UsbStateHandler {
    endpoint: &'static HidEndpoint,
}

impl UsbStateHandler {
    #[must_use]
    pub const fn new(endpoint: &'static HidEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Handler for UsbStateHandler {
    fn reset(&mut self) {
        self.endpoint.set_configured(false);
    }

    fn configured(&mut self, configured: bool) {
        info!("USB configured: {}", configured);
        self.endpoint.set_configured(configured);
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
) -> GamepadHidWriter<'d> {
    let config = Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: POLL_INTERVAL_MS,
        max_packet_size: 64,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
