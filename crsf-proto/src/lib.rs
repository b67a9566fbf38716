//! CRSF RC-channels decoding and gamepad mapping.
//!
//! This crate turns the byte stream from an ExpressLRS/Crossfire receiver
//! into [`GamepadReport`](gamepad_core::GamepadReport)s. It has no chip-specific
//! dependencies and is fully testable on host.
//!
//! - [`receiver`]: gap-delimited frame assembly ([`FrameReceiver`])
//! - [`channels`]: 11-bit channel packing
//! - [`decoder`]: RC channels frame to report ([`decode_frame`])
//! - [`mapping`]: raw channel values to axes and switches
//! - [`encoder`]: RC channels frame construction, for tools and tests
//! - [`input`]: [`InputSource`](gamepad_core::InputSource) implementation ([`CrsfInput`])
//!
//! # Example
//!
//! ```ignore
//! use crsf_proto::CrsfInput;
//! use gamepad_core::GamepadBridge;
//!
//! let mut bridge = GamepadBridge::new(CrsfInput::new(), uart, usb_serial, hid, clock);
//! bridge.run();
//! ```
//!
//! # UART Configuration
//!
//! CRSF uses 420000 baud, 8N1:
//! - Baud rate: 420000 (ExpressLRS)
//! - Data bits: 8
//! - Parity: None
//! - Stop bits: 1

#![cfg_attr(not(feature = "std"), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod channels;
pub mod decoder;
pub mod encoder;
pub mod input;
pub mod mapping;
pub mod protocol;
pub mod receiver;

pub use channels::{pack_channels, unpack_channels, Channels, RC_CHANNELS_PAYLOAD_LEN};
pub use decoder::decode_frame;
pub use encoder::{crc8, encode_rc_channels_frame, RC_CHANNELS_FRAME_LEN};
pub use input::CrsfInput;
pub use mapping::{
    channels_to_report, crsf_to_axis, crsf_to_switch, CRSF_CHANNEL_VALUE_1000,
    CRSF_CHANNEL_VALUE_2000, CRSF_CHANNEL_VALUE_MAX, CRSF_CHANNEL_VALUE_MID,
    CRSF_CHANNEL_VALUE_MIN, SWITCH_THRESHOLD,
};
pub use protocol::{CRSF_BAUDRATE, CRSF_MAX_FRAME_SIZE, CRSF_NUM_CHANNELS};
pub use receiver::{Discard, FrameReceiver, FRAME_BUFFER_SIZE, FRAME_GAP_US};
