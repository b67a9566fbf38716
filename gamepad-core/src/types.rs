//! Core report types: Switches, Axis, GamepadReport.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Number of analog axes in a report.
pub const AXIS_COUNT: usize = 8;

/// Number of binary switches in a report.
pub const SWITCH_COUNT: usize = 8;

/// Logical minimum advertised for every axis.
pub const AXIS_MIN: i16 = -32767;

/// Logical maximum advertised for every axis.
pub const AXIS_MAX: i16 = 32767;

/// Switch state represented as an 8-bit bitfield.
///
/// Bit 0 is the first switch (HID button 1).
///
/// # Example
///
/// ```
/// use gamepad_core::Switches;
///
/// let switches = Switches::SW1 | Switches::SW8;
/// assert!(switches.contains(Switches::SW1));
/// assert!(!switches.contains(Switches::SW2));
/// assert_eq!(switches.raw(), 0x81);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switches(pub u8);

impl Switches {
    pub const SW1: Self = Self(1 << 0);
    pub const SW2: Self = Self(1 << 1);
    pub const SW3: Self = Self(1 << 2);
    pub const SW4: Self = Self(1 << 3);
    pub const SW5: Self = Self(1 << 4);
    pub const SW6: Self = Self(1 << 5);
    pub const SW7: Self = Self(1 << 6);
    pub const SW8: Self = Self(1 << 7);

    /// All switches off.
    pub const NONE: Self = Self(0);

    /// All switches on.
    pub const ALL: Self = Self(0xFF);

    /// The switch at `index` (0-7) as a single-bit mask.
    ///
    /// Returns [`Switches::NONE`] for indices past the last switch.
    #[inline]
    #[must_use]
    pub const fn bit(index: usize) -> Self {
        if index < SWITCH_COUNT {
            Self(1 << index)
        } else {
            Self::NONE
        }
    }

    /// Check if the given switch(es) are on.
    #[inline]
    #[must_use]
    pub const fn contains(self, switch: Switches) -> bool {
        (self.0 & switch.0) == switch.0
    }

    /// Set or clear switch(es).
    #[inline]
    pub fn set(&mut self, switch: Switches, on: bool) {
        if on {
            self.0 |= switch.0;
        } else {
            self.0 &= !switch.0;
        }
    }

    /// Get the raw u8 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Check if no switches are on.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Switches {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Switches {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Switches {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Switches {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Switches {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// The eight axes of the report, in descriptor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
    Rx = 3,
    Ry = 4,
    Rz = 5,
    Slider1 = 6,
    Slider2 = 7,
}

impl Axis {
    /// All axes in report order.
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::X,
        Axis::Y,
        Axis::Z,
        Axis::Rx,
        Axis::Ry,
        Axis::Rz,
        Axis::Slider1,
        Axis::Slider2,
    ];

    /// Position of this axis in [`GamepadReport::axes`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-layout HID gamepad report.
///
/// Wire layout (17 bytes, no padding):
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 16   | 8 × `i16` axes, little-endian |
/// | 16     | 1    | switch bitfield, bit 0 = button 1 |
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    pub axes: [i16; AXIS_COUNT],
    pub switches: Switches,
}

impl GamepadReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = AXIS_COUNT * 2 + 1;

    /// Centered axes, all switches off.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            axes: [0; AXIS_COUNT],
            switches: Switches::NONE,
        }
    }

    /// Value of a single axis.
    #[inline]
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> i16 {
        self.axes[axis.index()]
    }

    /// Overwrite a single axis.
    #[inline]
    pub fn set_axis(&mut self, axis: Axis, value: i16) {
        self.axes[axis.index()] = value;
    }

    /// Serialize the report into its wire layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        for (chunk, axis) in bytes.chunks_exact_mut(2).zip(self.axes.iter()) {
            chunk.copy_from_slice(&axis.to_le_bytes());
        }
        bytes[Self::SIZE - 1] = self.switches.raw();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches_bitwise_or() {
        let switches = Switches::SW1 | Switches::SW3;
        assert!(switches.contains(Switches::SW1));
        assert!(switches.contains(Switches::SW3));
        assert!(!switches.contains(Switches::SW2));
        assert_eq!(switches.raw(), 0b0000_0101);
    }

    #[test]
    fn test_switches_set_clear() {
        let mut switches = Switches::NONE;
        switches.set(Switches::SW5, true);
        assert!(switches.contains(Switches::SW5));
        switches.set(Switches::SW5, false);
        assert!(switches.is_empty());
    }

    #[test]
    fn test_switches_bit_index() {
        assert_eq!(Switches::bit(0), Switches::SW1);
        assert_eq!(Switches::bit(7), Switches::SW8);
        assert_eq!(Switches::bit(8), Switches::NONE);
    }

    #[test]
    fn test_axis_order_matches_indices() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_report_neutral_bytes() {
        assert_eq!(GamepadReport::neutral().to_bytes(), [0u8; GamepadReport::SIZE]);
    }

    #[test]
    fn test_report_layout_little_endian() {
        let mut report = GamepadReport::neutral();
        report.set_axis(Axis::X, AXIS_MIN);
        report.set_axis(Axis::Y, AXIS_MAX);
        report.set_axis(Axis::Slider2, 0x1234);
        report.switches = Switches::SW1 | Switches::SW8;

        let bytes = report.to_bytes();
        assert_eq!(bytes.len(), 17);
        assert_eq!(&bytes[0..2], &[0x01, 0x80]);
        assert_eq!(&bytes[2..4], &[0xFF, 0x7F]);
        assert_eq!(&bytes[14..16], &[0x34, 0x12]);
        assert_eq!(bytes[16], 0x81);
        assert_eq!(report.axis(Axis::Slider2), 0x1234);
    }
}
