//! RC channels frame encoding.
//!
//! Builds the frames a receiver would send, for host tools and tests that
//! need to synthesize receiver traffic.

use crc::{Crc, CRC_8_DVB_S2};

use crate::channels::{pack_channels, Channels, RC_CHANNELS_PAYLOAD_LEN};
use crate::protocol::{address, frame_type, PAYLOAD_OFFSET, TYPE_OFFSET};

/// CRC-8/DVB-S2 calculator with 256-byte lookup table.
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_DVB_S2);

/// Total length of an RC channels packed frame.
pub const RC_CHANNELS_FRAME_LEN: usize = PAYLOAD_OFFSET + RC_CHANNELS_PAYLOAD_LEN + 1;

/// Calculate the frame CRC over `data` (type byte and payload).
#[inline]
#[must_use]
pub fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

/// Write an RC channels packed frame into `buf`.
///
/// Returns the number of bytes written, always [`RC_CHANNELS_FRAME_LEN`].
pub fn encode_rc_channels_frame(
    channels: &Channels,
    buf: &mut [u8; RC_CHANNELS_FRAME_LEN],
) -> usize {
    let crc_offset = RC_CHANNELS_FRAME_LEN - 1;

    buf[0] = address::FLIGHT_CONTROLLER;
    buf[1] = (RC_CHANNELS_FRAME_LEN - 2) as u8;
    buf[TYPE_OFFSET] = frame_type::RC_CHANNELS_PACKED;
    buf[PAYLOAD_OFFSET..crc_offset].copy_from_slice(&pack_channels(channels));
    buf[crc_offset] = crc8(&buf[TYPE_OFFSET..crc_offset]);

    RC_CHANNELS_FRAME_LEN
}
