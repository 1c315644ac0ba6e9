use std::io::{self, Write};

use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::matching::checker::CheckError;
use crate::report::ReportSink;

/// Writes the totals of a run once it completes.
pub struct SummaryReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> SummaryReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for SummaryReportWriter<W> {
    fn record(&mut self, _context: &RecordContext<'_>, _outcome: &MatchOutcome) -> io::Result<()> {
        Ok(())
    }

    fn fatal(&mut self, error: &CheckError) -> io::Result<()> {
        writeln!(self.writer, "Check aborted: {error}")?;
        self.writer.flush()
    }

    fn finish(&mut self, summary: &CheckSummary) -> io::Result<()> {
        write_summary(&mut self.writer, summary)?;
        self.writer.flush()
    }
}

/// Write a summary in the plain-text layout shared by the report file and the
/// terminal output.
///
/// # Errors
///
/// Returns any error raised by the writer.
pub fn write_summary<W: Write + ?Sized>(writer: &mut W, summary: &CheckSummary) -> io::Result<()> {
    writeln!(
        writer,
        "Number of matches: {}/{}",
        summary.matches, summary.records
    )?;
    writeln!(
        writer,
        "Percentage of matches: {:.2}%",
        summary.match_percentage()
    )?;
    writeln!(writer, "Mismatches: {}", summary.mismatches)?;
    writeln!(writer, "Unknown contigs: {}", summary.unknown_contigs)?;
    writeln!(writer, "Out of bounds: {}", summary.out_of_bounds)?;
    writeln!(writer, "Malformed records: {}", summary.malformed)?;
    writeln!(
        writer,
        "Verdict: {}",
        if summary.verdict() { "PASS" } else { "FAIL" }
    )
}
