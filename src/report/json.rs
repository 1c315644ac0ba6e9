//! JSON Lines report.
//!
//! ```text
//! {"line":4,"outcome":"mismatch","expected":"ACGG","actual":"ACGT"}
//! {"line":5,"outcome":"unknown_contig","name":"chrX"}
//! {"summary":{"records":2,"matches":0,...},"match_percentage":0.0,"verdict":false}
//! ```

use std::io::{self, Write};

use serde::Serialize;

use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::matching::checker::CheckError;
use crate::report::ReportSink;

#[derive(Serialize)]
struct RecordLine<'a> {
    line: u64,
    #[serde(flatten)]
    outcome: &'a MatchOutcome,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a CheckSummary,
    match_percentage: f64,
    verdict: bool,
}

#[derive(Serialize)]
struct FatalLine {
    fatal: String,
}

/// Writes one JSON object per line.
pub struct JsonReportWriter<W: Write> {
    writer: W,
    include_matches: bool,
}

impl<W: Write> JsonReportWriter<W> {
    /// Report only records that did not match
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_matches: false,
        }
    }

    /// Also report records that matched
    #[must_use]
    pub fn with_matches(mut self) -> Self {
        self.include_matches = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> ReportSink for JsonReportWriter<W> {
    fn record(&mut self, context: &RecordContext<'_>, outcome: &MatchOutcome) -> io::Result<()> {
        if outcome.is_match() && !self.include_matches {
            return Ok(());
        }
        self.write_line(&RecordLine {
            line: context.line_number,
            outcome,
        })
    }

    fn fatal(&mut self, error: &CheckError) -> io::Result<()> {
        self.write_line(&FatalLine {
            fatal: error.to_string(),
        })?;
        self.writer.flush()
    }

    fn finish(&mut self, summary: &CheckSummary) -> io::Result<()> {
        self.write_line(&SummaryLine {
            summary,
            match_percentage: summary.match_percentage(),
            verdict: summary.verdict(),
        })?;
        self.writer.flush()
    }
}
