//! Extraction of the reference identity of VCF data lines.
//!
//! Only the columns needed to locate a record on the reference are read:
//!
//! | Column | Field | Used |
//! |--------|-------|------|
//! | 1 | `CHROM` | contig name |
//! | 2 | `POS` | 1-based position |
//! | 3 | `ID` | ignored |
//! | 4 | `REF` | declared reference allele |
//! | 5.. | `ALT`, `QUAL`, ... | ignored |
//!
//! The rest of the record grammar is deliberately left unvalidated.

use thiserror::Error;

use crate::core::record::RecordCore;

/// Lines starting with this marker are meta-information or the column header
pub const HEADER_MARKER: char = '#';

const FIELD_SEPARATOR: char = '\t';
const CHROM_FIELD: usize = 0;
const POS_FIELD: usize = 1;
const REF_FIELD: usize = 3;

/// A data line that does not carry a usable contig, position and reference allele.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed record at line {line_number}: {reason}")]
pub struct MalformedRecord {
    pub line_number: u64,
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(line_number: u64, reason: impl Into<String>) -> Self {
        Self {
            line_number,
            reason: reason.into(),
        }
    }
}

/// Whether the line is a header or comment line rather than a record
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_MARKER)
}

/// Extract the contig, position and reference allele of one VCF line.
///
/// Returns `Ok(None)` for header and comment lines, which are not records and
/// must be skipped rather than reported.
///
/// # Errors
///
/// Returns `MalformedRecord` if the line has fewer than four fields, an empty
/// contig name, a position that is not a positive integer, or an empty
/// reference allele.
pub fn extract(line: &str, line_number: u64) -> Result<Option<RecordCore>, MalformedRecord> {
    let line = line.trim_end_matches(['\r', '\n']);
    if is_header_line(line) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.splitn(REF_FIELD + 2, FIELD_SEPARATOR).collect();
    if fields.len() <= REF_FIELD {
        return Err(MalformedRecord::new(
            line_number,
            format!(
                "expected at least {} tab-separated fields, found {}",
                REF_FIELD + 1,
                fields.len()
            ),
        ));
    }

    let chromosome = fields[CHROM_FIELD];
    if chromosome.is_empty() {
        return Err(MalformedRecord::new(line_number, "empty chromosome name"));
    }

    let position = parse_position(fields[POS_FIELD]).ok_or_else(|| {
        MalformedRecord::new(
            line_number,
            format!("position '{}' is not a positive integer", fields[POS_FIELD]),
        )
    })?;

    let reference_allele = fields[REF_FIELD];
    if reference_allele.is_empty() {
        return Err(MalformedRecord::new(line_number, "empty reference allele"));
    }

    Ok(Some(RecordCore::new(chromosome, position, reference_allele)))
}

fn parse_position(field: &str) -> Option<u64> {
    // u64 parsing accepts a leading '+', VCF positions never carry one
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse::<u64>().ok().filter(|&position| position >= 1)
}
