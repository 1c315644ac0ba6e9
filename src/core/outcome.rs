use std::fmt;

use serde::Serialize;

/// Result of checking a single variant record against the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Declared reference allele matches the reference bases
    Match,

    /// Declared reference allele differs from the reference bases
    Mismatch {
        /// Allele declared by the record
        expected: String,
        /// Bases found in the reference
        actual: String,
    },

    /// The record names a contig that the reference index does not contain
    UnknownContig { name: String },

    /// The record's reference allele extends past the end of the contig, or
    /// the reference file ends before the indexed contig does
    OutOfBounds {
        contig: String,
        position: u64,
        length: u64,
        contig_length: u64,
    },

    /// The line could not be read as a variant record
    MalformedRecord { line_number: u64, reason: String },
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Match)
    }

    /// Short machine-friendly label for the outcome kind
    pub fn kind(&self) -> &'static str {
        match self {
            MatchOutcome::Match => "match",
            MatchOutcome::Mismatch { .. } => "mismatch",
            MatchOutcome::UnknownContig { .. } => "unknown_contig",
            MatchOutcome::OutOfBounds { .. } => "out_of_bounds",
            MatchOutcome::MalformedRecord { .. } => "malformed_record",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Match => write!(f, "reference allele matches"),
            MatchOutcome::Mismatch { expected, actual } => write!(
                f,
                "reference allele '{expected}' does not match reference sequence '{actual}'"
            ),
            MatchOutcome::UnknownContig { name } => {
                write!(f, "contig '{name}' is not present in the reference")
            }
            MatchOutcome::OutOfBounds {
                contig,
                position,
                length,
                contig_length,
            } => write!(
                f,
                "{length} reference base(s) at {contig}:{position} fall outside the contig \
                 (length {contig_length})"
            ),
            MatchOutcome::MalformedRecord { reason, .. } => {
                write!(f, "malformed record: {reason}")
            }
        }
    }
}

/// Running totals for one check, and its overall verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub records: u64,
    pub matches: u64,
    pub mismatches: u64,
    pub unknown_contigs: u64,
    pub out_of_bounds: u64,
    pub malformed: u64,
}

impl CheckSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, outcome: &MatchOutcome) {
        self.records += 1;
        match outcome {
            MatchOutcome::Match => self.matches += 1,
            MatchOutcome::Mismatch { .. } => self.mismatches += 1,
            MatchOutcome::UnknownContig { .. } => self.unknown_contigs += 1,
            MatchOutcome::OutOfBounds { .. } => self.out_of_bounds += 1,
            MatchOutcome::MalformedRecord { .. } => self.malformed += 1,
        }
    }

    /// True when every record seen so far matched (vacuously true for no records)
    pub fn verdict(&self) -> bool {
        self.matches == self.records
    }

    /// Percentage of records that matched, 100 when there were none
    #[allow(clippy::cast_precision_loss)] // Record counts far below 2^52
    pub fn match_percentage(&self) -> f64 {
        if self.records == 0 {
            100.0
        } else {
            self.matches as f64 * 100.0 / self.records as f64
        }
    }
}
