//! Host-initiated serial passthrough.
//!
//! Flashing tools on the host talk to the receiver through the USB virtual
//! serial channel. Any byte from the host switches the bridge into
//! passthrough: bytes are copied verbatim in both directions until neither
//! side has produced anything for [`PASSTHROUGH_IDLE_TIMEOUT_MS`]. While
//! passthrough is active the RC decode path does not run.

use crate::serial::SerialPort;

/// Silence on both directions that ends a passthrough session.
pub const PASSTHROUGH_IDLE_TIMEOUT_MS: u64 = 2_000;

/// Arbiter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PassthroughState {
    /// Normal RC operation.
    #[default]
    Idle,
    /// Relaying bytes; `last_activity_ms` is when a byte last moved.
    Bridging { last_activity_ms: u64 },
}

/// Decides each tick whether the serial link belongs to the host.
#[derive(Debug)]
pub struct Passthrough {
    state: PassthroughState,
    idle_timeout_ms: u64,
}

impl Default for Passthrough {
    fn default() -> Self {
        Self::new()
    }
}

impl Passthrough {
    /// Create an idle arbiter with the default 2 s idle timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_idle_timeout_ms(PASSTHROUGH_IDLE_TIMEOUT_MS)
    }

    /// Create an idle arbiter with a custom idle timeout.
    #[must_use]
    pub const fn with_idle_timeout_ms(idle_timeout_ms: u64) -> Self {
        Self {
            state: PassthroughState::Idle,
            idle_timeout_ms,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PassthroughState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, PassthroughState::Bridging { .. })
    }

    /// Run one arbitration step.
    ///
    /// Returns `true` when passthrough owns this tick and the caller must
    /// skip RC processing. On the tick the idle timeout expires the arbiter
    /// returns to idle and yields `false`, so RC processing resumes at once.
    pub fn tick<H, D>(&mut self, host: &mut H, device: &mut D, now_ms: u64) -> bool
    where
        H: SerialPort,
        D: SerialPort,
    {
        let mut last_activity_ms = match self.state {
            PassthroughState::Idle => {
                if !host.available() {
                    return false;
                }
                info!("Host traffic on virtual serial, entering passthrough");
                now_ms
            }
            PassthroughState::Bridging { last_activity_ms } => last_activity_ms,
        };

        let upstream = relay(host, device);
        let downstream = relay(device, host);
        if upstream + downstream > 0 {
            trace!("Passthrough relayed {} up, {} down", upstream, downstream);
            last_activity_ms = now_ms;
        }

        if now_ms.saturating_sub(last_activity_ms) >= self.idle_timeout_ms {
            info!("Passthrough idle, resuming RC decode");
            self.state = PassthroughState::Idle;
            return false;
        }

        self.state = PassthroughState::Bridging { last_activity_ms };
        true
    }
}

/// Copy pending bytes from `from` to `to`. Returns the number of bytes moved.
///
/// Stops as soon as the destination has no room, leaving the rest queued in
/// `from` for a later tick.
fn relay<F, T>(from: &mut F, to: &mut T) -> usize
where
    F: SerialPort,
    T: SerialPort,
{
    let mut moved = 0;
    while to.can_write() {
        let Some(byte) = from.read_byte() else {
            break;
        };
        if let Err(e) = to.write_byte(byte) {
            warn!("Passthrough write failed: {:?}", e);
        }
        moved += 1;
    }
    moved
}
