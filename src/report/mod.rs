//! Report sinks receiving the outcome of every checked record.
//!
//! The checker only knows the [`ReportSink`] trait; each output format is one
//! implementation:
//!
//! - [`text::TextReportWriter`]: one readable line per failing record
//! - [`summary::SummaryReportWriter`]: totals and the final verdict
//! - [`valid::ValidRecordsWriter`]: header lines and matching records, as VCF
//! - [`json::JsonReportWriter`]: JSON Lines for scripting
//! - [`log::LogReporter`]: `tracing` events
//!
//! Every registered sink sees every notification, in input order.

use std::io;

use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::matching::checker::CheckError;

pub mod json;
pub mod log;
pub mod summary;
pub mod text;
pub mod valid;

pub trait ReportSink {
    /// Called for each header or comment line of the variant input.
    ///
    /// # Errors
    ///
    /// A write failure aborts the check.
    fn header(&mut self, _context: &RecordContext<'_>) -> io::Result<()> {
        Ok(())
    }

    /// Called once for every record, with the outcome of checking it.
    ///
    /// # Errors
    ///
    /// A write failure aborts the check.
    fn record(&mut self, context: &RecordContext<'_>, outcome: &MatchOutcome) -> io::Result<()>;

    /// Called when the check aborts. No `finish` call follows.
    ///
    /// # Errors
    ///
    /// Errors are ignored: the check is already failing.
    fn fatal(&mut self, _error: &CheckError) -> io::Result<()> {
        Ok(())
    }

    /// Called once the whole input has been checked.
    ///
    /// # Errors
    ///
    /// A write failure turns the run into a fatal error.
    fn finish(&mut self, summary: &CheckSummary) -> io::Result<()>;
}

/// A sink that keeps every notification in memory.
///
/// Useful for library callers that want the outcomes as values, and in tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub headers: Vec<u64>,
    pub outcomes: Vec<(u64, MatchOutcome)>,
    pub fatal: Option<String>,
    pub summary: Option<CheckSummary>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for CollectingSink {
    fn header(&mut self, context: &RecordContext<'_>) -> io::Result<()> {
        self.headers.push(context.line_number);
        Ok(())
    }

    fn record(&mut self, context: &RecordContext<'_>, outcome: &MatchOutcome) -> io::Result<()> {
        self.outcomes.push((context.line_number, outcome.clone()));
        Ok(())
    }

    fn fatal(&mut self, error: &CheckError) -> io::Result<()> {
        self.fatal = Some(error.to_string());
        Ok(())
    }

    fn finish(&mut self, summary: &CheckSummary) -> io::Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}
