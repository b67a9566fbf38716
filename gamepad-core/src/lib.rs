//! Platform-agnostic gamepad bridge: HID report, device traits and main loop.
//!
//! This crate provides the core abstractions for turning a serial RC link
//! into a USB HID gamepad without any platform-specific dependencies. It can
//! be used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Report data structures ([`GamepadReport`], [`Switches`], [`Axis`])
//! - [`descriptor`]: HID report descriptor matching [`GamepadReport`]
//! - [`serial`]: Byte-level port trait ([`SerialPort`])
//! - [`input`]: Protocol decoder trait ([`InputSource`])
//! - [`output`]: HID sink trait ([`OutputSink`])
//! - [`clock`]: Monotonic time source ([`Clock`])
//! - [`dispatch`]: Latest-report slot ([`ReportDispatcher`])
//! - [`passthrough`]: Host-to-receiver serial bridging ([`Passthrough`])
//! - [`bridge`]: The main loop ([`GamepadBridge`])
//!
//! # Scheduling
//!
//! Everything runs from [`GamepadBridge::tick`] on a single thread of
//! control. Passthrough is checked first and, while the host is talking to
//! the receiver, claims the tick. Otherwise the input source consumes at
//! most one byte and the dispatcher forwards any fresh report.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`log`**: Route logging through the `log` facade (for host tools)
//! - **`mock`**: Export in-memory collaborators for tests in dependent crates
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bridge;
pub mod clock;
pub mod descriptor;
pub mod dispatch;
pub mod input;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod output;
pub mod passthrough;
pub mod serial;
pub mod types;

// Re-export main types at crate root
pub use bridge::{GamepadBridge, TickOutcome};
pub use clock::Clock;
pub use descriptor::{POLL_INTERVAL_MS, REPORT_DESCRIPTOR, REPORT_ID};
pub use dispatch::{Dispatch, ReportDispatcher};
pub use input::InputSource;
pub use output::{OutputError, OutputSink};
pub use passthrough::{Passthrough, PassthroughState, PASSTHROUGH_IDLE_TIMEOUT_MS};
pub use serial::{SerialError, SerialPort};
pub use types::{Axis, GamepadReport, Switches, AXIS_COUNT, AXIS_MAX, AXIS_MIN, SWITCH_COUNT};
