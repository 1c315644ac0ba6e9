//! Streaming check of a variant file against an indexed reference.
//!
//! Every data line is reduced to its [`RecordCore`], located in the reference
//! through the FASTA index and compared with the bases found there. Each
//! outcome goes to every registered [`ReportSink`] before the next line is
//! read, so memory use does not depend on the size of the variant file.
//!
//! Record-level problems (mismatches, unknown contigs, out-of-bounds positions,
//! malformed lines) are reported and the run continues. Only a malformed index,
//! an I/O failure on the inputs, or a sink that cannot write, abort the run; those
//! surface as [`CheckError`] rather than as a `false` verdict.

use std::io::{self, BufRead, BufReader, Read, Seek};

use thiserror::Error;

use crate::core::index::FastaIndex;
use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::{RecordContext, RecordCore};
use crate::matching::sequence::is_matching_sequence;
use crate::parsing::fai::{parse_fai, IndexError};
use crate::parsing::fasta::{read_slice, ReadAt, SliceError};
use crate::parsing::vcf::{extract, MalformedRecord, HEADER_MARKER};
use crate::report::ReportSink;

/// Default read buffer for the variant input
pub const DEFAULT_LINE_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Invalid reference index: {0}")]
    Index(#[from] IndexError),

    #[error("Failed to read variant input: {0}")]
    VariantIo(#[source] io::Error),

    #[error("Failed to read reference sequence: {0}")]
    ReferenceIo(#[source] io::Error),

    #[error("Failed to write report: {0}")]
    Report(#[source] io::Error),

    #[error("{0}")]
    MalformedRecord(MalformedRecord),
}

/// What to do with a data line that is not a usable record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRecordPolicy {
    /// Report the line and keep checking
    #[default]
    Report,
    /// Report the line, then abort the run
    Abort,
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub malformed_policy: MalformedRecordPolicy,

    /// Capacity of the buffer the variant input is read through
    pub line_buffer_size: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            malformed_policy: MalformedRecordPolicy::Report,
            line_buffer_size: DEFAULT_LINE_BUFFER_SIZE,
        }
    }
}

/// Checks variant records against one indexed reference.
pub struct AssemblyChecker<S> {
    index: FastaIndex,
    reference: S,
    config: CheckConfig,
}

impl<S: ReadAt> AssemblyChecker<S> {
    pub fn new(index: FastaIndex, reference: S) -> Self {
        Self {
            index,
            reference,
            config: CheckConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn index(&self) -> &FastaIndex {
        &self.index
    }

    /// Check a single record against the reference.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::ReferenceIo` if the reference cannot be read. Every
    /// other problem is a record-level outcome.
    pub fn check_record(&mut self, record: &RecordCore) -> Result<MatchOutcome, CheckError> {
        let Some(entry) = self.index.get(&record.chromosome) else {
            return Ok(MatchOutcome::UnknownContig {
                name: record.chromosome.clone(),
            });
        };

        let length = record.reference_length();
        match read_slice(&mut self.reference, entry, record.position, length) {
            Ok(bases) => {
                if is_matching_sequence(&bases, record.reference_allele.as_bytes()) {
                    Ok(MatchOutcome::Match)
                } else {
                    Ok(MatchOutcome::Mismatch {
                        expected: record.reference_allele.clone(),
                        actual: String::from_utf8_lossy(&bases).into_owned(),
                    })
                }
            }
            Err(SliceError::OutOfBounds {
                contig,
                position,
                length,
                contig_length,
            }) => Ok(MatchOutcome::OutOfBounds {
                contig,
                position,
                length,
                contig_length,
            }),
            Err(SliceError::Truncated { contig, .. }) => Ok(MatchOutcome::OutOfBounds {
                contig,
                position: record.position,
                length,
                contig_length: entry.length,
            }),
            Err(SliceError::Io(e)) => Err(CheckError::ReferenceIo(e)),
        }
    }

    /// Check every record of a variant stream, reporting each outcome to all
    /// sinks.
    ///
    /// Returns `true` only if every record matched the reference.
    ///
    /// # Errors
    ///
    /// Returns `CheckError` if the run aborts: an I/O failure on either input,
    /// a sink that fails to write, or a malformed record under
    /// [`MalformedRecordPolicy::Abort`]. Sinks are told through
    /// [`ReportSink::fatal`] before the error is returned.
    pub fn check<R: Read>(
        &mut self,
        variants: R,
        sinks: &mut [&mut dyn ReportSink],
    ) -> Result<bool, CheckError> {
        let reader = BufReader::with_capacity(self.config.line_buffer_size, variants);

        match self.stream(reader, sinks) {
            Ok(summary) => Ok(summary.verdict()),
            Err(err) => {
                abort(&err, sinks);
                Err(err)
            }
        }
    }

    fn stream<R: BufRead>(
        &mut self,
        mut reader: R,
        sinks: &mut [&mut dyn ReportSink],
    ) -> Result<CheckSummary, CheckError> {
        let mut summary = CheckSummary::new();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(CheckError::VariantIo)?;
            if read == 0 {
                break;
            }
            line_number += 1;

            // Header bytes are echoed, never parsed, so they may be in any encoding
            let is_header = buffer.first() == Some(&(HEADER_MARKER as u8));
            let text = String::from_utf8_lossy(&buffer);
            let line = text.trim_end_matches(['\r', '\n']);
            let context = RecordContext { line_number, line };

            let extracted = if is_header {
                Ok(None)
            } else if std::str::from_utf8(&buffer).is_ok() {
                extract(line, line_number)
            } else {
                Err(MalformedRecord::new(line_number, "line is not valid UTF-8"))
            };

            let (outcome, malformed) = match extracted {
                Ok(None) => {
                    notify(sinks, |sink| sink.header(&context))?;
                    continue;
                }
                Ok(Some(record)) => (self.check_record(&record)?, None),
                Err(malformed) => (
                    MatchOutcome::MalformedRecord {
                        line_number,
                        reason: malformed.reason.clone(),
                    },
                    Some(malformed),
                ),
            };

            summary.observe(&outcome);
            notify(sinks, |sink| sink.record(&context, &outcome))?;

            if let Some(malformed) = malformed {
                if self.config.malformed_policy == MalformedRecordPolicy::Abort {
                    return Err(CheckError::MalformedRecord(malformed));
                }
            }
        }

        notify(sinks, |sink| sink.finish(&summary))?;
        Ok(summary)
    }
}

fn notify<F>(sinks: &mut [&mut dyn ReportSink], mut f: F) -> Result<(), CheckError>
where
    F: FnMut(&mut dyn ReportSink) -> io::Result<()>,
{
    for sink in sinks.iter_mut() {
        f(&mut **sink).map_err(CheckError::Report)?;
    }
    Ok(())
}

fn abort(err: &CheckError, sinks: &mut [&mut dyn ReportSink]) {
    for sink in sinks.iter_mut() {
        // The run is already failing with `err`
        let _ = sink.fatal(err);
    }
}

/// Check a variant stream against a reference and its FASTA index.
///
/// Returns `true` if every record matched, `false` if any record did not.
///
/// # Errors
///
/// Returns `CheckError::Index` if the index is malformed (before any record is
/// read), or any error that aborts [`AssemblyChecker::check`].
pub fn check<V, F, I>(
    variant_input: V,
    reference_input: F,
    index_input: I,
    sinks: &mut [&mut dyn ReportSink],
) -> Result<bool, CheckError>
where
    V: Read,
    F: Read + Seek,
    I: BufRead,
{
    let index = match parse_fai(index_input) {
        Ok(index) => index,
        Err(e) => {
            let err = CheckError::from(e);
            abort(&err, sinks);
            return Err(err);
        }
    };

    AssemblyChecker::new(index, reference_input).check(variant_input, sinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollectingSink;
    use std::io::Cursor;

    const FAI: &str = "chr1\t1000\t6\t70\t71\n";

    /// `>chr1\n` followed by 1000 bases wrapped at 70, with ACGT at 50..=53
    fn reference() -> Vec<u8> {
        let mut bases: Vec<u8> = b"TTGCA".iter().cycle().take(1000).copied().collect();
        bases[49..53].copy_from_slice(b"ACGT");
        let mut fasta = b">chr1\n".to_vec();
        for line in bases.chunks(70) {
            fasta.extend_from_slice(line);
            fasta.push(b'\n');
        }
        fasta
    }

    fn run(vcf: &str) -> (Result<bool, CheckError>, CollectingSink) {
        let mut sink = CollectingSink::new();
        let result = check(
            vcf.as_bytes(),
            Cursor::new(reference()),
            FAI.as_bytes(),
            &mut [&mut sink],
        );
        (result, sink)
    }

    #[test]
    fn test_matching_record() {
        let (result, sink) = run("chr1\t50\t.\tACGT\t.\n");
        assert!(result.unwrap());
        assert_eq!(sink.outcomes, vec![(1, MatchOutcome::Match)]);
        assert!(sink.summary.unwrap().verdict());
    }

    #[test]
    fn test_mismatching_record() {
        let (result, sink) = run("chr1\t50\t.\tACGG\t.\n");
        assert!(!result.unwrap());
        assert_eq!(
            sink.outcomes,
            vec![(
                1,
                MatchOutcome::Mismatch {
                    expected: "ACGG".to_string(),
                    actual: "ACGT".to_string(),
                }
            )]
        );
    }

    #[test]
    fn test_unknown_contig() {
        let (result, sink) = run("chrX\t10\t.\tA\t.\n");
        assert!(!result.unwrap());
        assert_eq!(
            sink.outcomes,
            vec![(
                1,
                MatchOutcome::UnknownContig {
                    name: "chrX".to_string()
                }
            )]
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let (result, sink) = run("chr1\t998\t.\tCATT\t.\n");
        assert!(!result.unwrap());
        assert_eq!(
            sink.outcomes,
            vec![(
                1,
                MatchOutcome::OutOfBounds {
                    contig: "chr1".to_string(),
                    position: 998,
                    length: 4,
                    contig_length: 1000,
                }
            )]
        );
    }

    #[test]
    fn test_malformed_record_does_not_stop_run() {
        let vcf = "chr1\tfifty\t.\tA\t.\nchr1\t50\t.\tacgt\t.\n";
        let (result, sink) = run(vcf);
        assert!(!result.unwrap());

        assert_eq!(sink.outcomes.len(), 2);
        assert!(matches!(
            sink.outcomes[0],
            (1, MatchOutcome::MalformedRecord { line_number: 1, .. })
        ));
        assert_eq!(sink.outcomes[1], (2, MatchOutcome::Match));

        let summary = sink.summary.unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.matches, 1);
    }

    #[test]
    fn test_headers_are_skipped_not_checked() {
        let vcf = "##fileformat=VCFv4.2\n##contig=<ID=chr1,length=1000>\n\
                   #CHROM\tPOS\tID\tREF\tALT\n\
                   chr1\t50\t.\tACGT\t.\n";
        let (result, sink) = run(vcf);
        assert!(result.unwrap());
        assert_eq!(sink.headers, vec![1, 2, 3]);
        assert_eq!(sink.outcomes, vec![(4, MatchOutcome::Match)]);
    }

    #[test]
    fn test_empty_input_passes() {
        let (result, sink) = run("");
        assert!(result.unwrap());
        assert_eq!(sink.summary.unwrap().records, 0);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut vcf = b"chr1\t50\t.\t\xff\t.\n".to_vec();
        vcf.extend_from_slice(b"chr1\t50\t.\tACGT\t.\n");

        let mut sink = CollectingSink::new();
        let result = check(
            vcf.as_slice(),
            Cursor::new(reference()),
            FAI.as_bytes(),
            &mut [&mut sink],
        );

        assert!(!result.unwrap());
        assert!(matches!(
            sink.outcomes[0].1,
            MatchOutcome::MalformedRecord { .. }
        ));
        assert_eq!(sink.outcomes[1].1, MatchOutcome::Match);
    }

    #[test]
    fn test_non_utf8_header_is_not_malformed() {
        let mut vcf = b"##fileformat=VCFv4.1\n##source=caf\xe9 caller\n".to_vec();
        vcf.extend_from_slice(b"chr1\t50\t.\tACGT\t.\n");

        let mut sink = CollectingSink::new();
        let result = check(
            vcf.as_slice(),
            Cursor::new(reference()),
            FAI.as_bytes(),
            &mut [&mut sink],
        );

        assert!(result.unwrap());
        assert_eq!(sink.headers, vec![1, 2]);
        assert_eq!(sink.outcomes, vec![(3, MatchOutcome::Match)]);
    }

    #[test]
    fn test_malformed_index_is_fatal() {
        let mut sink = CollectingSink::new();
        let result = check(
            "chr1\t50\t.\tACGT\t.\n".as_bytes(),
            Cursor::new(reference()),
            "chr1\t1000\t6\t70\n".as_bytes(),
            &mut [&mut sink],
        );

        assert!(matches!(
            result,
            Err(CheckError::Index(IndexError::MalformedIndex { .. }))
        ));
        assert!(sink.outcomes.is_empty());
        assert!(sink.summary.is_none());
        assert!(sink.fatal.is_some());
    }

    #[test]
    fn test_abort_policy() {
        let index = parse_fai(FAI.as_bytes()).unwrap();
        let mut checker = AssemblyChecker::new(index, Cursor::new(reference())).with_config(
            CheckConfig {
                malformed_policy: MalformedRecordPolicy::Abort,
                ..CheckConfig::default()
            },
        );

        let mut sink = CollectingSink::new();
        let vcf = "chr1\t50\t.\tACGT\t.\nchr1\t0\t.\tA\t.\nchr1\t50\t.\tACGT\t.\n";
        let result = checker.check(vcf.as_bytes(), &mut [&mut sink]);

        assert!(matches!(result, Err(CheckError::MalformedRecord(_))));
        // The offending line is reported before the run stops
        assert_eq!(sink.outcomes.len(), 2);
        assert!(sink.summary.is_none());
        assert!(sink.fatal.is_some());
    }

    #[test]
    fn test_every_sink_sees_every_outcome() {
        let mut first = CollectingSink::new();
        let mut second = CollectingSink::new();
        let vcf = "chr1\t50\t.\tACGT\t.\nchrX\t1\t.\tA\t.\nchr1\t51\t.\tCG\t.\n";

        let result = check(
            vcf.as_bytes(),
            Cursor::new(reference()),
            FAI.as_bytes(),
            &mut [&mut first, &mut second],
        );

        assert!(!result.unwrap());
        assert_eq!(first.outcomes.len(), 3);
        assert_eq!(first.outcomes, second.outcomes);
        assert_eq!(first.summary, second.summary);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_variant_io_error_is_fatal() {
        let mut sink = CollectingSink::new();
        let result = check(
            FailingReader,
            Cursor::new(reference()),
            FAI.as_bytes(),
            &mut [&mut sink],
        );

        assert!(matches!(result, Err(CheckError::VariantIo(_))));
        assert!(sink.fatal.is_some());
        assert!(sink.summary.is_none());
    }

    struct BrokenSink;

    impl ReportSink for BrokenSink {
        fn record(&mut self, _: &RecordContext<'_>, _: &MatchOutcome) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }

        fn finish(&mut self, _: &CheckSummary) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_fatal() {
        let mut broken = BrokenSink;
        let mut sink = CollectingSink::new();
        let result = check(
            "chr1\t50\t.\tACGT\t.\n".as_bytes(),
            Cursor::new(reference()),
            FAI.as_bytes(),
            &mut [&mut sink, &mut broken],
        );

        assert!(matches!(result, Err(CheckError::Report(_))));
        assert!(sink.fatal.unwrap().contains("disk full"));
    }
}
