//! Parser for FASTA index (.fai) files.
//!
//! Format: `name\tlength\toffset\tline_bases\tline_width`, one contig per line.
//!
//! The text parser is strict: every line must carry exactly five fields, numbers
//! must parse, names must be unique and the line layout must be usable for
//! random access. When no index exists, one can be computed from the FASTA
//! itself with noodles.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;

use crate::core::index::{FastaIndex, IndexEntry};
use crate::utils::validation::check_contig_limit;

const FAI_FIELDS: usize = 5;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed FASTA index at line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many contigs: {0} exceeds maximum allowed (100000)")]
    TooManyContigs(usize),
}

impl IndexError {
    fn malformed(line: usize, reason: impl Into<String>) -> Self {
        IndexError::MalformedIndex {
            line,
            reason: reason.into(),
        }
    }
}

/// Parse a FASTA index (.fai) file
///
/// # Errors
///
/// Returns `IndexError::Io` if the file cannot be read, otherwise see
/// [`parse_fai`].
pub fn parse_fai_file(path: &Path) -> Result<FastaIndex, IndexError> {
    let reader = std::fs::File::open(path).map(BufReader::new)?;
    parse_fai(reader)
}

/// Parse FAI from text
///
/// # Errors
///
/// See [`parse_fai`].
pub fn parse_fai_text(text: &str) -> Result<FastaIndex, IndexError> {
    parse_fai(text.as_bytes())
}

/// Parse a FASTA index from any buffered reader.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns `IndexError::MalformedIndex` for a line with the wrong number of
/// fields, a non-numeric field, a duplicated contig name or an unusable line
/// layout, `IndexError::TooManyContigs` if the limit is exceeded, and
/// `IndexError::Io` if reading fails.
pub fn parse_fai<R: BufRead>(mut reader: R) -> Result<FastaIndex, IndexError> {
    let mut index = FastaIndex::new();
    let mut buffer = String::new();
    let mut line_num = 0;

    loop {
        buffer.clear();
        if reader.read_line(&mut buffer)? == 0 {
            break;
        }
        line_num += 1;

        let line = buffer.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        // Check contig limit for DOS protection
        if check_contig_limit(index.len()).is_some() {
            return Err(IndexError::TooManyContigs(index.len()));
        }

        let entry = parse_fai_line(line, line_num)?;
        index.insert(entry).map_err(|duplicate| {
            IndexError::malformed(
                line_num,
                format!("duplicate contig name '{}'", duplicate.name),
            )
        })?;
    }

    Ok(index)
}

fn parse_fai_line(line: &str, line_num: usize) -> Result<IndexEntry, IndexError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FAI_FIELDS {
        return Err(IndexError::malformed(
            line_num,
            format!("expected {FAI_FIELDS} fields, found {}", fields.len()),
        ));
    }

    let name = fields[0];
    if name.is_empty() {
        return Err(IndexError::malformed(line_num, "empty contig name"));
    }

    let number = |field: &str, what: &str| -> Result<u64, IndexError> {
        field.parse().map_err(|_| {
            IndexError::malformed(
                line_num,
                format!("invalid {what} for contig '{name}': '{field}'"),
            )
        })
    };

    let entry = IndexEntry::new(
        name,
        number(fields[1], "length")?,
        number(fields[2], "offset")?,
        number(fields[3], "line_bases")?,
        number(fields[4], "line_width")?,
    );

    if let Some(problem) = entry.layout_problem() {
        return Err(IndexError::malformed(
            line_num,
            format!("contig '{name}': {problem}"),
        ));
    }

    Ok(entry)
}

/// Compute the index of an uncompressed FASTA file by scanning it with noodles.
///
/// # Errors
///
/// Returns `IndexError::Noodles` if the FASTA cannot be indexed, or
/// `IndexError::MalformedIndex` if it contains the same contig name twice.
pub fn build_fai(path: &Path) -> Result<FastaIndex, IndexError> {
    let index = noodles::fasta::index(path)
        .map_err(|e| IndexError::Noodles(format!("Failed to index FASTA file: {e}")))?;

    index_from_noodles(&index)
}

/// Convert a noodles FAI index to a `FastaIndex`
fn index_from_noodles(index: &noodles::fasta::fai::Index) -> Result<FastaIndex, IndexError> {
    let mut fasta_index = FastaIndex::new();

    for (i, record) in index.as_ref().iter().enumerate() {
        // Check contig limit for DOS protection
        if check_contig_limit(fasta_index.len()).is_some() {
            return Err(IndexError::TooManyContigs(fasta_index.len()));
        }

        let entry = IndexEntry::new(
            String::from_utf8_lossy(record.name()).to_string(),
            record.length(),
            record.offset(),
            record.line_bases(),
            record.line_width(),
        );

        fasta_index.insert(entry).map_err(|duplicate| {
            IndexError::malformed(
                i + 1,
                format!("duplicate contig name '{}'", duplicate.name),
            )
        })?;
    }

    Ok(fasta_index)
}

/// Write an index in the standard five-column FAI layout
///
/// # Errors
///
/// Returns any error raised by the underlying writer.
pub fn write_fai<W: Write>(mut writer: W, index: &FastaIndex) -> std::io::Result<()> {
    for entry in index.iter() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            entry.name, entry.length, entry.offset, entry.line_bases, entry.line_width
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn assert_malformed(result: Result<FastaIndex, IndexError>, expected_line: usize) {
        match result {
            Err(IndexError::MalformedIndex { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected MalformedIndex at line {expected_line}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_fai_text() {
        let fai = "chr1\t248956422\t112\t70\t71
chr2\t242193529\t253404903\t70\t71
chrM\t16569\t3099922541\t70\t71
";

        let index = parse_fai_text(fai).unwrap();
        assert_eq!(index.len(), 3);

        let chr1 = index.get("chr1").unwrap();
        assert_eq!(chr1.length, 248_956_422);
        assert_eq!(chr1.offset, 112);
        assert_eq!(chr1.line_bases, 70);
        assert_eq!(chr1.line_width, 71);

        assert_eq!(index.get("chrM").unwrap().offset, 3_099_922_541);
        assert_eq!(
            index.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["chr1", "chr2", "chrM"]
        );
    }

    #[test]
    fn test_parse_fai_crlf_and_blank_lines() {
        let fai = "chr1\t1000\t6\t70\t72\r\n\r\nchr2\t10\t1100\t10\t12\r\n";
        let index = parse_fai_text(fai).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("chr1").unwrap().line_width, 72);
        assert_eq!(index.get("chr2").unwrap().line_width, 12);
    }

    #[test]
    fn test_parse_fai_empty() {
        let index = parse_fai_text("").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_parse_fai_wrong_field_count() {
        assert_malformed(parse_fai_text("chr1\t1000\t6\t70\n"), 1);
        assert_malformed(parse_fai_text("chr1\t1000\t6\t70\t71\t0\n"), 1);
    }

    #[test]
    fn test_parse_fai_invalid_number() {
        let fai = "chr1\t1000\t6\t70\t71\nchr2\tlong\t1100\t70\t71\n";
        assert_malformed(parse_fai_text(fai), 2);

        assert_malformed(parse_fai_text("chr1\t1000\t-6\t70\t71\n"), 1);
    }

    #[test]
    fn test_parse_fai_duplicate_name() {
        let fai = "chr1\t1000\t6\t70\t71\nchr1\t500\t2000\t70\t71\n";
        let err = parse_fai_text(fai).unwrap_err();
        assert!(err.to_string().contains("duplicate contig name 'chr1'"));
        assert_malformed(parse_fai_text(fai), 2);
    }

    #[test]
    fn test_parse_fai_bad_layout() {
        // Line width cannot be narrower than the bases it holds
        assert_malformed(parse_fai_text("chr1\t1000\t6\t70\t69\n"), 1);
        // Non-empty contig needs a line width in bases
        assert_malformed(parse_fai_text("chr1\t1000\t6\t0\t1\n"), 1);
        // Empty contigs may have a zero layout
        assert!(parse_fai_text("empty\t0\t6\t0\t0\n").is_ok());
    }

    #[test]
    fn test_parse_fai_file() {
        let mut temp = NamedTempFile::with_suffix(".fai").unwrap();
        temp.write_all(b"chr1\t12\t6\t8\t9\n").unwrap();
        temp.flush().unwrap();

        let index = parse_fai_file(temp.path()).unwrap();
        assert_eq!(index.get("chr1").unwrap().line_bases, 8);
    }

    #[test]
    fn test_build_fai_from_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1 description\nACGTACGT\nACGT\n>chr2\nGGGG\n")
            .unwrap();
        temp.flush().unwrap();

        let index = build_fai(temp.path()).unwrap();
        assert_eq!(index.len(), 2);

        let chr1 = index.get("chr1").unwrap();
        assert_eq!(chr1.length, 12);
        assert_eq!(chr1.offset, 18);
        assert_eq!(chr1.line_bases, 8);
        assert_eq!(chr1.line_width, 9);

        let chr2 = index.get("chr2").unwrap();
        assert_eq!(chr2.length, 4);
        assert_eq!(chr2.offset, 38);
    }

    #[test]
    fn test_write_fai_round_trips_through_parser() {
        let fai = "chr1\t1000\t6\t70\t71\nchr2\t10\t1030\t10\t11\n";
        let index = parse_fai_text(fai).unwrap();

        let mut out = Vec::new();
        write_fai(&mut out, &index).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), fai);
    }
}
