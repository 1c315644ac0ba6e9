use std::io::{self, Write};

use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::matching::checker::CheckError;
use crate::report::ReportSink;

/// Writes one line per record that did not match the reference.
pub struct TextReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TextReportWriter<W> {
    fn record(&mut self, context: &RecordContext<'_>, outcome: &MatchOutcome) -> io::Result<()> {
        if outcome.is_match() {
            return Ok(());
        }
        writeln!(self.writer, "Line {}: {outcome}", context.line_number)
    }

    fn fatal(&mut self, error: &CheckError) -> io::Result<()> {
        writeln!(self.writer, "Check aborted: {error}")?;
        self.writer.flush()
    }

    fn finish(&mut self, _summary: &CheckSummary) -> io::Result<()> {
        self.writer.flush()
    }
}
