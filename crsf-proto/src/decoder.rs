//! RC channels frame decoding.

use gamepad_core::GamepadReport;

use crate::channels::{unpack_channels, RC_CHANNELS_PAYLOAD_LEN};
use crate::mapping::channels_to_report;
use crate::protocol::{address, frame_type, PAYLOAD_OFFSET, TYPE_OFFSET};

/// Decode a complete frame into a gamepad report.
///
/// Only packed RC channels frames addressed to the flight controller are
/// decoded; anything else yields `None`. The trailing CRC is not checked.
#[must_use]
pub fn decode_frame(frame: &[u8]) -> Option<GamepadReport> {
    let addr = *frame.first()?;
    if addr != address::FLIGHT_CONTROLLER {
        trace!("Ignoring frame for address {:#x}", addr);
        return None;
    }

    let kind = *frame.get(TYPE_OFFSET)?;
    if kind != frame_type::RC_CHANNELS_PACKED {
        trace!("Ignoring frame type {:#x}", kind);
        return None;
    }

    let payload: &[u8; RC_CHANNELS_PAYLOAD_LEN] = match frame
        .get(PAYLOAD_OFFSET..PAYLOAD_OFFSET + RC_CHANNELS_PAYLOAD_LEN)
        .and_then(|p| p.try_into().ok())
    {
        Some(p) => p,
        None => {
            debug!("RC channels frame too short: {} bytes", frame.len());
            return None;
        }
    };

    Some(channels_to_report(&unpack_channels(payload)))
}
