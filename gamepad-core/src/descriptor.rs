//! HID report descriptor matching [`GamepadReport`](crate::GamepadReport).

/// Report ID used for every input report. Zero means "no report ID byte".
pub const REPORT_ID: u8 = 0;

/// Interrupt endpoint poll interval advertised to the host.
pub const POLL_INTERVAL_MS: u8 = 2;

/// Generic Desktop usage for the first slider axis.
pub const USAGE_SLIDER1: u8 = 0x36;

/// Generic Desktop usage for the second slider axis.
pub const USAGE_SLIDER2: u8 = 0x37;

/// Gamepad with 8 signed 16-bit axes and an 8-button bitmap.
///
/// - Axes: X, Y, Z, Rx, Ry, Rz, Slider, Slider (-32767..32767)
/// - Buttons: 1-8 (0/1)
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Axes ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x33, //   Usage (Rx)
    0x09, 0x34, //   Usage (Ry)
    0x09, 0x35, //   Usage (Rz)
    0x09, USAGE_SLIDER1, //   Usage (Slider)
    0x09, USAGE_SLIDER2, //   Usage (Slider)
    0x16, 0x01, 0x80, //   Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, //   Logical Maximum (32767)
    0x95, 0x08, //   Report Count (8)
    0x75, 0x10, //   Report Size (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Buttons (8 switches) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x08, //   Usage Maximum (Button 8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x08, //   Report Count (8)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GamepadReport, AXIS_MAX, AXIS_MIN};

    /// Sum of Report Size × Report Count over every Input item.
    fn input_bits(descriptor: &[u8]) -> usize {
        let mut bits = 0;
        let mut size = 0;
        let mut count = 0;
        let mut i = 0;
        while i < descriptor.len() {
            let prefix = descriptor[i];
            let len = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let data = &descriptor[i + 1..i + 1 + len];
            let value = data
                .iter()
                .rev()
                .fold(0usize, |acc, &b| (acc << 8) | b as usize);
            match prefix & 0xFC {
                0x74 => size = value,
                0x94 => count = value,
                0x80 => bits += size * count,
                _ => {}
            }
            i += 1 + len;
        }
        bits
    }

    #[test]
    fn test_descriptor_matches_report_size() {
        assert_eq!(input_bits(REPORT_DESCRIPTOR), GamepadReport::SIZE * 8);
    }

    #[test]
    fn test_descriptor_axis_range() {
        let min = AXIS_MIN.to_le_bytes();
        let max = AXIS_MAX.to_le_bytes();
        assert!(REPORT_DESCRIPTOR
            .windows(3)
            .any(|w| w == [0x16, min[0], min[1]]));
        assert!(REPORT_DESCRIPTOR
            .windows(3)
            .any(|w| w == [0x26, max[0], max[1]]));
    }

    #[test]
    fn test_descriptor_collection_balanced() {
        assert_eq!(REPORT_DESCRIPTOR.first(), Some(&0x05));
        assert_eq!(REPORT_DESCRIPTOR.last(), Some(&0xC0));
    }
}
