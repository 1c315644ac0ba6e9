use std::io::{self, Write};

use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::report::ReportSink;

/// Writes the header and every matching record, producing a VCF that only
/// holds records consistent with the reference.
pub struct ValidRecordsWriter<W: Write> {
    writer: W,
}

impl<W: Write> ValidRecordsWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for ValidRecordsWriter<W> {
    fn header(&mut self, context: &RecordContext<'_>) -> io::Result<()> {
        writeln!(self.writer, "{}", context.line)
    }

    fn record(&mut self, context: &RecordContext<'_>, outcome: &MatchOutcome) -> io::Result<()> {
        if outcome.is_match() {
            writeln!(self.writer, "{}", context.line)?;
        }
        Ok(())
    }

    fn finish(&mut self, _summary: &CheckSummary) -> io::Result<()> {
        self.writer.flush()
    }
}
