//! Byte pipes between async I/O tasks and the polling bridge loop.
//!
//! The UART and the USB virtual serial channel are both driven by async
//! tasks that move bytes into and out of [`Pipe`]s. [`PipePort`] gives the
//! bridge a non-blocking [`SerialPort`] view over one receive pipe and one
//! transmit pipe. [`UartPort`] does the same for the receiver link, except
//! that received bytes travel with the time they came off the wire.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::pipe::Pipe;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::Builder;
use gamepad_core::{SerialError, SerialPort};

/// Capacity of each direction's byte pipe.
pub const PIPE_SIZE: usize = 256;

/// Max packet size of the CDC-ACM bulk endpoints.
pub const CDC_PACKET_SIZE: u16 = 64;

pub type BytePipe = Pipe<CriticalSectionRawMutex, PIPE_SIZE>;

/// Received bytes paired with their arrival time in microseconds.
pub type TimedByteChannel = Channel<CriticalSectionRawMutex, (u8, u64), PIPE_SIZE>;

/// Non-blocking serial port over a pair of pipes.
#[derive(Clone, Copy)]
pub struct PipePort {
    rx: &'static BytePipe,
    tx: &'static BytePipe,
}

impl PipePort {
    /// `rx` is filled by the I/O task, `tx` is drained by it.
    #[must_use]
    pub const fn new(rx: &'static BytePipe, tx: &'static BytePipe) -> Self {
        Self { rx, tx }
    }
}

impl SerialPort for PipePort {
    fn available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.rx.try_read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn can_write(&mut self) -> bool {
        self.tx.free_capacity() > 0
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        write_pipe(self.tx, byte)
    }
}

/// Non-blocking serial port whose received bytes carry arrival times.
#[derive(Clone, Copy)]
pub struct UartPort {
    rx: &'static TimedByteChannel,
    tx: &'static BytePipe,
}

impl UartPort {
    /// `rx` is filled by the UART task as bytes arrive, `tx` is drained by it.
    #[must_use]
    pub const fn new(rx: &'static TimedByteChannel, tx: &'static BytePipe) -> Self {
        Self { rx, tx }
    }
}

impl SerialPort for UartPort {
    fn available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.try_receive().ok().map(|(byte, _)| byte)
    }

    fn read_byte_at(&mut self, _now_us: u64) -> Option<(u8, u64)> {
        self.rx.try_receive().ok()
    }

    fn can_write(&mut self) -> bool {
        self.tx.free_capacity() > 0
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        write_pipe(self.tx, byte)
    }
}

fn write_pipe(pipe: &BytePipe, byte: u8) -> Result<(), SerialError> {
    match pipe.try_write(&[byte]) {
        Ok(1) => Ok(()),
        _ => Err(SerialError::Full),
    }
}

/// Configure the CDC-ACM virtual serial class in the USB builder.
pub fn configure_usb_serial<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
) -> CdcAcmClass<'d, Driver<'d, USB>> {
    CdcAcmClass::new(builder, state, CDC_PACKET_SIZE)
}
