//! Latest-report slot and its at-most-once delivery to an [`OutputSink`].

use crate::descriptor::REPORT_ID;
use crate::output::OutputSink;
use crate::types::GamepadReport;

/// What happened to the pending report on a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Nothing new since the last attempt.
    Idle,
    /// The report was handed to the sink.
    Sent,
    /// The sink was busy or failed; the report was discarded.
    Dropped,
}

/// Holds the most recent report and a ready flag.
///
/// The report is overwritten in place on every [`publish`](Self::publish);
/// the flag is cleared on every [`dispatch`](Self::dispatch) that observes it,
/// whether or not the sink took the report. A busy endpoint therefore drops
/// the report instead of queueing it, and the next decoded frame replaces it.
#[derive(Debug, Default)]
pub struct ReportDispatcher {
    report: GamepadReport,
    ready: bool,
}

impl ReportDispatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            report: GamepadReport::neutral(),
            ready: false,
        }
    }

    /// Replace the held report and mark it fresh.
    #[inline]
    pub fn publish(&mut self, report: GamepadReport) {
        self.report = report;
        self.ready = true;
    }

    /// Whether a report is waiting to be sent.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The most recently published report.
    #[inline]
    #[must_use]
    pub fn report(&self) -> &GamepadReport {
        &self.report
    }

    /// Send the held report if it is fresh and the sink can take it.
    pub fn dispatch<O: OutputSink>(&mut self, sink: &mut O) -> Dispatch {
        if !self.ready {
            return Dispatch::Idle;
        }
        self.ready = false;

        if !sink.is_ready() {
            trace!("HID endpoint busy, dropping report");
            return Dispatch::Dropped;
        }

        match sink.send_report(REPORT_ID, &self.report.to_bytes()) {
            Ok(()) => Dispatch::Sent,
            Err(e) => {
                warn!("HID send failed: {:?}", e);
                Dispatch::Dropped
            }
        }
    }
}
