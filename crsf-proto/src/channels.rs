//! 11-bit channel packing.
//!
//! The RC channels payload is 16 unsigned 11-bit values laid end to end,
//! least significant bit first: channel 0 occupies bits 0-10 of the payload,
//! channel 1 bits 11-21, and so on, for 176 bits (22 bytes) in total.

use crate::protocol::CRSF_NUM_CHANNELS;

/// Bits per channel.
pub const CHANNEL_BITS: u32 = 11;

/// Largest raw channel value.
pub const CHANNEL_MASK: u16 = (1 << CHANNEL_BITS) - 1;

/// Payload length of an RC channels packed frame.
pub const RC_CHANNELS_PAYLOAD_LEN: usize = 22;

/// Raw channel values, in the 0..=2047 domain.
pub type Channels = [u16; CRSF_NUM_CHANNELS];

/// Unpack 16 channels from a packed payload.
#[must_use]
pub fn unpack_channels(payload: &[u8; RC_CHANNELS_PAYLOAD_LEN]) -> Channels {
    let mut channels = [0u16; CRSF_NUM_CHANNELS];
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut slots = channels.iter_mut();

    for &byte in payload {
        acc |= (byte as u32) << bits;
        bits += 8;
        while bits >= CHANNEL_BITS {
            // 22 bytes hold exactly 16 channels, so a slot is always left
            if let Some(slot) = slots.next() {
                *slot = (acc as u16) & CHANNEL_MASK;
            }
            acc >>= CHANNEL_BITS;
            bits -= CHANNEL_BITS;
        }
    }

    channels
}

/// Pack 16 channels into a payload. Values are truncated to 11 bits.
#[must_use]
pub fn pack_channels(channels: &Channels) -> [u8; RC_CHANNELS_PAYLOAD_LEN] {
    let mut payload = [0u8; RC_CHANNELS_PAYLOAD_LEN];
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = payload.iter_mut();

    for &channel in channels {
        acc |= ((channel & CHANNEL_MASK) as u32) << bits;
        bits += CHANNEL_BITS;
        while bits >= 8 {
            if let Some(byte) = out.next() {
                *byte = acc as u8;
            }
            acc >>= 8;
            bits -= 8;
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Payload for channels 0-7 at 992 and 8-15 at 0.
    const MID_PAYLOAD: [u8; RC_CHANNELS_PAYLOAD_LEN] = [
        0xE0, 0x03, 0x1F, 0xF8, 0xC0, 0x07, 0x3E, 0xF0, 0x81, 0x0F, 0x7C, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn test_unpack_known_payload() {
        let channels = unpack_channels(&MID_PAYLOAD);
        assert_eq!(&channels[..8], &[992; 8]);
        assert_eq!(&channels[8..], &[0; 8]);
    }

    #[test]
    fn test_unpack_channel_index_order() {
        let payload = [
            0x00, 0x08, 0x80, 0x00, 0x06, 0x40, 0x80, 0x02, 0x18, 0xE0, 0x00, 0x08, 0x48, 0x80,
            0x02, 0x16, 0xC0, 0x80, 0x06, 0x38, 0xE0, 0x01,
        ];
        let channels = unpack_channels(&payload);
        for (i, &value) in channels.iter().enumerate() {
            assert_eq!(value as usize, i);
        }
    }

    #[test]
    fn test_unpack_all_ones_is_max() {
        let channels = unpack_channels(&[0xFF; RC_CHANNELS_PAYLOAD_LEN]);
        assert_eq!(channels, [CHANNEL_MASK; CRSF_NUM_CHANNELS]);
    }

    #[test]
    fn test_pack_known_payload() {
        let mut channels = [0u16; CRSF_NUM_CHANNELS];
        channels[..8].fill(992);
        assert_eq!(pack_channels(&channels), MID_PAYLOAD);
    }

    #[test]
    fn test_pack_truncates_to_11_bits() {
        let mut channels = [0u16; CRSF_NUM_CHANNELS];
        channels[0] = 0xF800 | 5;
        let payload = pack_channels(&channels);
        assert_eq!(unpack_channels(&payload)[0], 5);
        assert_eq!(unpack_channels(&payload)[1], 0);
    }

    #[test]
    fn test_matches_fixed_shift_layout() {
        let channels: Channels = [
            172, 1811, 992, 191, 1792, 1791, 0, 2047, 172, 1811, 992, 191, 1792, 1791, 0, 2047,
        ];
        let d = pack_channels(&channels).map(u16::from);

        // Explicit shift/mask form of the layout for a few channels
        assert_eq!((d[0] | d[1] << 8) & CHANNEL_MASK, 172);
        assert_eq!((d[1] >> 3 | d[2] << 5) & CHANNEL_MASK, 1811);
        assert_eq!((d[2] >> 6 | d[3] << 2 | d[4] << 10) & CHANNEL_MASK, 992);
        assert_eq!((d[9] >> 5 | d[10] << 3) & CHANNEL_MASK, 2047);
        assert_eq!((d[20] >> 5 | d[21] << 3) & CHANNEL_MASK, 2047);
        assert_eq!(unpack_channels(&pack_channels(&channels)), channels);
    }
}
