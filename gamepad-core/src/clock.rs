//! Monotonic time source.

/// Monotonic clock with microsecond resolution.
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin.
    fn now_micros(&self) -> u64;
}
