use std::io;

use tracing::{debug, error, info, warn};

use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::matching::checker::CheckError;
use crate::report::ReportSink;

/// Emits every outcome as a `tracing` event.
///
/// Matches are logged at debug level, every other outcome as a warning.
#[derive(Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for LogReporter {
    fn record(&mut self, context: &RecordContext<'_>, outcome: &MatchOutcome) -> io::Result<()> {
        if outcome.is_match() {
            debug!(line = context.line_number, "Reference allele matches");
        } else {
            warn!(
                line = context.line_number,
                outcome = outcome.kind(),
                "{outcome}"
            );
        }
        Ok(())
    }

    fn fatal(&mut self, err: &CheckError) -> io::Result<()> {
        error!(error = %err, "Assembly check aborted");
        Ok(())
    }

    fn finish(&mut self, summary: &CheckSummary) -> io::Result<()> {
        info!(
            records = summary.records,
            matches = summary.matches,
            verdict = summary.verdict(),
            "Assembly check finished"
        );
        Ok(())
    }
}
