//! CRSF receiver to USB gamepad bridge for RP2040.
//!
//! This crate provides the embedded glue that runs the platform-agnostic
//! [`GamepadBridge`] on a Raspberry Pi Pico (RP2040):
//! 1. Receives CRSF frames from an ExpressLRS receiver over UART (420000 baud, 8N1)
//! 2. Decodes RC channels frames into HID gamepad reports
//! 3. Outputs the reports as a USB HID gamepad (8 axes, 8 switches)
//! 4. Exposes a USB virtual serial port that the host can use to talk to
//!    the receiver directly (e.g. for flashing or configuration)
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | To receiver RX (passthrough only) |
//! | UART1 RX | 9    | From receiver TX (CRSF input) |
//!
//! # Architecture
//!
//! The bridge loop is synchronous and never blocks. Embassy tasks move bytes
//! between the peripherals and static buffers:
//!
//! - **USB Task**: Manages the USB device stack
//! - **UART RX/TX Tasks**: Copy bytes between UART1 and the UART queues,
//!   stamping each received byte with its arrival time
//! - **CDC RX/TX Tasks**: Copy bytes between the virtual serial port and its pipes
//! - **HID Task**: Writes the latest report to the interrupt IN endpoint
//! - **Bridge Task**: Calls [`GamepadBridge::tick`] and yields
//!
//! # Modules
//!
//! - [`serial`]: Pipe-backed [`SerialPort`](gamepad_core::SerialPort)s ([`PipePort`], [`UartPort`])
//! - [`usb_output`]: USB HID output ([`HidSink`], [`HidEndpoint`])
//! - [`clock`]: Embassy time as a [`Clock`](gamepad_core::Clock) ([`EmbassyClock`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

pub mod clock;
pub mod serial;
pub mod usb_output;

pub use clock::EmbassyClock;
pub use crsf_proto::{CrsfInput, CRSF_BAUDRATE};
pub use gamepad_core::{GamepadBridge, GamepadReport, TickOutcome};
pub use serial::{
    configure_usb_serial, BytePipe, PipePort, TimedByteChannel, UartPort, PIPE_SIZE,
};
pub use usb_output::{configure_usb_hid, GamepadHidWriter, HidEndpoint, HidSink, UsbStateHandler};

/// The bridge as wired on this board.
pub type Bridge = GamepadBridge<CrsfInput, UartPort, PipePort, HidSink, EmbassyClock>;
