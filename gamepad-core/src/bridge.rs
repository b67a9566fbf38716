//! GamepadBridge: the cooperative main loop tying everything together.

use crate::clock::Clock;
use crate::dispatch::{Dispatch, ReportDispatcher};
use crate::input::InputSource;
use crate::output::OutputSink;
use crate::passthrough::Passthrough;
use crate::serial::SerialPort;

/// Result of one [`GamepadBridge::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Passthrough owned the tick; RC processing was skipped.
    Passthrough,
    /// RC processing ran; carries the dispatcher result.
    Rc(Dispatch),
}

/// Owns the receiver link, the host links and all shared state.
///
/// Each [`tick`](Self::tick) runs, in order:
///
/// 1. the passthrough arbiter, which may claim the whole tick;
/// 2. the input source, fed at most one byte from the receiver UART;
/// 3. the report dispatcher, which forwards a fresh report to the HID sink.
///
/// There is exactly one thread of control, so the report and its ready flag
/// are always updated together.
pub struct GamepadBridge<I, U, H, O, C> {
    input: I,
    uart: U,
    host_serial: H,
    output: O,
    clock: C,
    passthrough: Passthrough,
    dispatcher: ReportDispatcher,
}

impl<I, U, H, O, C> GamepadBridge<I, U, H, O, C>
where
    I: InputSource,
    U: SerialPort,
    H: SerialPort,
    O: OutputSink,
    C: Clock,
{
    /// Create a bridge with the default passthrough timeout.
    ///
    /// * `uart` - physical serial port wired to the receiver
    /// * `host_serial` - USB virtual serial channel to the host
    /// * `output` - USB HID endpoint
    pub fn new(input: I, uart: U, host_serial: H, output: O, clock: C) -> Self {
        Self::with_passthrough(input, uart, host_serial, output, clock, Passthrough::new())
    }

    /// Create a bridge with a custom passthrough arbiter.
    pub fn with_passthrough(
        input: I,
        uart: U,
        host_serial: H,
        output: O,
        clock: C,
        passthrough: Passthrough,
    ) -> Self {
        Self {
            input,
            uart,
            host_serial,
            output,
            clock,
            passthrough,
            dispatcher: ReportDispatcher::new(),
        }
    }

    /// Run the bridge forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// Run one scheduling step.
    pub fn tick(&mut self) -> TickOutcome {
        let now_us = self.clock.now_micros();
        let was_bridging = self.passthrough.is_active();

        if self
            .passthrough
            .tick(&mut self.host_serial, &mut self.uart, now_us / 1_000)
        {
            if !was_bridging {
                // Receiver bytes now belong to the host
                self.input.reset();
            }
            return TickOutcome::Passthrough;
        }

        if let Some(report) = self.input.poll(&mut self.uart, now_us) {
            trace!("Decoded report: {:?}", report);
            self.dispatcher.publish(report);
        }

        TickOutcome::Rc(self.dispatcher.dispatch(&mut self.output))
    }

    /// Whether passthrough currently owns the serial link.
    #[inline]
    pub fn is_passthrough(&self) -> bool {
        self.passthrough.is_active()
    }

    /// The most recently decoded report.
    #[inline]
    pub fn report(&self) -> &crate::types::GamepadReport {
        self.dispatcher.report()
    }

    /// Get a reference to the input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::{MockClock, MockPort, MockSink};
    use crate::types::{Axis, GamepadReport};
    use std::vec;
    use std::vec::Vec;

    /// Emits a report with X set to each byte it reads.
    #[derive(Default)]
    struct EchoInput {
        resets: usize,
    }

    impl InputSource for EchoInput {
        fn poll<P: SerialPort>(&mut self, port: &mut P, _now_us: u64) -> Option<GamepadReport> {
            let byte = port.read_byte()?;
            let mut report = GamepadReport::neutral();
            report.set_axis(Axis::X, byte as i16);
            Some(report)
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    struct Rig {
        uart: MockPort,
        host: MockPort,
        sink: MockSink,
        clock: MockClock,
        bridge: GamepadBridge<EchoInput, MockPort, MockPort, MockSink, MockClock>,
    }

    fn rig() -> Rig {
        let uart = MockPort::new();
        let host = MockPort::new();
        let sink = MockSink::new();
        let clock = MockClock::new();
        let bridge = GamepadBridge::new(
            EchoInput::default(),
            uart.clone(),
            host.clone(),
            sink.clone(),
            clock.clone(),
        );
        Rig {
            uart,
            host,
            sink,
            clock,
            bridge,
        }
    }

    fn sent_x(sink: &MockSink) -> Vec<u8> {
        sink.sent().iter().map(|(_, bytes)| bytes[0]).collect()
    }

    #[test]
    fn test_forwards_one_report_per_byte() {
        let mut rig = rig();
        rig.uart.inject(&[7, 9]);

        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Sent));
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Sent));
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Idle));
        assert_eq!(sent_x(&rig.sink), vec![7, 9]);
        assert_eq!(rig.bridge.report().axis(Axis::X), 9);
    }

    #[test]
    fn test_busy_endpoint_drops_report() {
        let mut rig = rig();
        rig.sink.set_ready(false);
        rig.uart.inject(&[1]);
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Dropped));

        rig.sink.set_ready(true);
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Idle));
        assert!(rig.sink.sent().is_empty());
    }

    #[test]
    fn test_passthrough_preempts_rc() {
        let mut rig = rig();
        rig.uart.inject(&[0x11, 0x22]);
        rig.host.inject(&[0xF0]);

        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);
        assert!(rig.bridge.is_passthrough());
        assert_eq!(rig.bridge.input().resets, 1);

        // Receiver bytes went to the host, not to the decoder
        assert_eq!(rig.host.take_written(), vec![0x11, 0x22]);
        assert_eq!(rig.uart.take_written(), vec![0xF0]);
        assert!(rig.sink.sent().is_empty());
    }

    #[test]
    fn test_passthrough_holds_host_bytes_while_uart_is_full() {
        let mut rig = rig();
        rig.uart.reject_writes(true);
        rig.host.inject(&[1, 2, 3]);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);
        assert_eq!(rig.host.pending(), 3);

        rig.uart.reject_writes(false);
        rig.clock.advance_millis(1);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);
        assert_eq!(rig.uart.take_written(), vec![1, 2, 3]);
        assert_eq!(rig.host.pending(), 0);
    }

    #[test]
    fn test_rc_resumes_after_two_seconds_of_silence() {
        let mut rig = rig();
        rig.host.inject(&[0xF0]);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);

        rig.clock.advance_millis(1_999);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);

        // Still relayed while the session is open
        rig.uart.inject(&[0x42]);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);
        assert_eq!(rig.host.take_written(), vec![0x42]);

        rig.clock.advance_millis(1_999);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);

        rig.clock.advance_millis(1);
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Idle));
        assert!(!rig.bridge.is_passthrough());

        rig.uart.inject(&[5]);
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Sent));
        assert_eq!(sent_x(&rig.sink), vec![5]);
        assert_eq!(rig.bridge.input().resets, 1);
    }

    #[test]
    fn test_host_traffic_reenters_passthrough() {
        let mut rig = rig();
        rig.host.inject(&[1]);
        rig.bridge.tick();
        rig.clock.advance_millis(2_000);
        assert_eq!(rig.bridge.tick(), TickOutcome::Rc(Dispatch::Idle));

        rig.host.inject(&[2]);
        assert_eq!(rig.bridge.tick(), TickOutcome::Passthrough);
        assert_eq!(rig.bridge.input().resets, 2);
    }
}
