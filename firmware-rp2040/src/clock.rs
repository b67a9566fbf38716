//! Embassy time driver as the bridge clock.

use embassy_time::Instant;
use gamepad_core::Clock;

/// Microseconds since boot from the RP2040 timer.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }
}
