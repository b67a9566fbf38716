//! Channel-to-report mapping.
//!
//! Channels 0-7 drive the eight HID axes, channels 8-15 drive the eight
//! switches. Axes scale the transmitter's nominal 988-2012 µs span
//! (raw 172-1811) onto the full -32767..=32767 axis range.

use gamepad_core::{GamepadReport, Switches, AXIS_COUNT, AXIS_MAX, AXIS_MIN};

use crate::channels::Channels;

/// Raw value at 988 µs, the nominal stick minimum.
pub const CRSF_CHANNEL_VALUE_MIN: u16 = 172;

/// Raw value at 1000 µs.
pub const CRSF_CHANNEL_VALUE_1000: u16 = 191;

/// Raw value at 1500 µs, stick center.
pub const CRSF_CHANNEL_VALUE_MID: u16 = 992;

/// Raw value at 2000 µs.
pub const CRSF_CHANNEL_VALUE_2000: u16 = 1792;

/// Raw value at 2012 µs, the nominal stick maximum.
pub const CRSF_CHANNEL_VALUE_MAX: u16 = 1811;

/// Aux channels at or above this raw value turn their switch on.
pub const SWITCH_THRESHOLD: u16 = CRSF_CHANNEL_VALUE_2000;

/// First channel mapped to a switch.
pub const FIRST_SWITCH_CHANNEL: usize = AXIS_COUNT;

/// Convert a raw channel value to an axis value.
///
/// Linear in the raw value, rounded to nearest:
/// `172 -> -32767`, `1811 -> 32767`. Values outside the nominal span
/// extrapolate along the same line and saturate at the `i16` limits.
#[inline]
#[must_use]
pub fn crsf_to_axis(val: u16) -> i16 {
    let in_span = (CRSF_CHANNEL_VALUE_MAX - CRSF_CHANNEL_VALUE_MIN) as i32;
    let out_span = AXIS_MAX as i32 - AXIS_MIN as i32;
    let scaled = (val as i32 - CRSF_CHANNEL_VALUE_MIN as i32) * out_span;

    // in_span is odd, so a quotient never lands exactly on .5
    let half = in_span / 2;
    let rounded = if scaled >= 0 {
        (scaled + half) / in_span
    } else {
        (scaled - half) / in_span
    };

    (rounded + AXIS_MIN as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Check if an aux channel value turns its switch on.
#[inline]
#[must_use]
pub fn crsf_to_switch(val: u16) -> bool {
    val >= SWITCH_THRESHOLD
}

/// Build a full report from 16 raw channel values.
#[must_use]
pub fn channels_to_report(channels: &Channels) -> GamepadReport {
    let mut report = GamepadReport::neutral();

    for (axis, &raw) in report.axes.iter_mut().zip(channels.iter()) {
        *axis = crsf_to_axis(raw);
    }

    for (bit, &raw) in channels[FIRST_SWITCH_CHANNEL..].iter().enumerate() {
        report.switches.set(Switches::bit(bit), crsf_to_switch(raw));
    }

    report
}
