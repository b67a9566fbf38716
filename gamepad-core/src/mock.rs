//! In-memory collaborators for host tests.
//!
//! Every mock is a cheap handle: clones share the same underlying state, so
//! a test can keep one handle while the bridge owns another.

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::clock::Clock;
use crate::output::{OutputError, OutputSink};
use crate::serial::{SerialError, SerialPort};

/// Serial port backed by a receive queue and a transmit log.
///
/// Received bytes carry an optional arrival time; bytes queued with
/// [`inject`](Self::inject) have none and read back as arriving "now".
#[derive(Clone, Default)]
pub struct MockPort {
    rx: Rc<RefCell<VecDeque<(u8, Option<u64>)>>>,
    tx: Rc<RefCell<Vec<u8>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if they had arrived on the wire.
    pub fn inject(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().map(|&b| (b, None)));
    }

    /// Queue bytes that all arrived at `arrival_us`.
    pub fn inject_at(&self, bytes: &[u8], arrival_us: u64) {
        self.rx
            .borrow_mut()
            .extend(bytes.iter().map(|&b| (b, Some(arrival_us))));
    }

    /// Number of received bytes not yet read.
    pub fn pending(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Drain everything written to the port so far.
    pub fn take_written(&self) -> Vec<u8> {
        core::mem::take(&mut *self.tx.borrow_mut())
    }

    /// Report the port as full: `can_write` is false and writes fail with
    /// [`SerialError::Full`].
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }
}

impl SerialPort for MockPort {
    fn available(&mut self) -> bool {
        !self.rx.borrow().is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.borrow_mut().pop_front().map(|(byte, _)| byte)
    }

    fn read_byte_at(&mut self, now_us: u64) -> Option<(u8, u64)> {
        let (byte, arrival_us) = self.rx.borrow_mut().pop_front()?;
        Some((byte, arrival_us.unwrap_or(now_us)))
    }

    fn can_write(&mut self) -> bool {
        !self.reject_writes.get()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        if self.reject_writes.get() {
            return Err(SerialError::Full);
        }
        self.tx.borrow_mut().push(byte);
        Ok(())
    }
}

/// Report sink that records every report it accepts.
#[derive(Clone)]
pub struct MockSink {
    ready: Rc<Cell<bool>>,
    fail: Rc<Cell<bool>>,
    sent: Rc<RefCell<Vec<(u8, Vec<u8>)>>>,
}

impl Default for MockSink {
    fn default() -> Self {
        Self {
            ready: Rc::new(Cell::new(true)),
            fail: Rc::new(Cell::new(false)),
            sent: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    /// Make `send_report` fail with [`OutputError::Io`].
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    /// Reports accepted so far, as `(report_id, bytes)`.
    pub fn sent(&self) -> Vec<(u8, Vec<u8>)> {
        self.sent.borrow().clone()
    }
}

impl OutputSink for MockSink {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn send_report(&mut self, report_id: u8, report: &[u8]) -> Result<(), OutputError> {
        if self.fail.get() {
            return Err(OutputError::Io);
        }
        self.sent.borrow_mut().push((report_id, report.to_vec()));
        Ok(())
    }
}

/// Manually advanced clock.
#[derive(Clone, Default)]
pub struct MockClock {
    now_us: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_micros(&self, now_us: u64) {
        self.now_us.set(now_us);
    }

    pub fn advance_micros(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }

    pub fn advance_millis(&self, ms: u64) {
        self.advance_micros(ms * 1_000);
    }
}

impl Clock for MockClock {
    fn now_micros(&self) -> u64 {
        self.now_us.get()
    }
}
