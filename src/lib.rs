//! # assembly-checker
//!
//! A library for checking that VCF records were called against a given
//! reference assembly.
//!
//! Variant files produced against the wrong assembly version, or with shifted
//! coordinates, often still parse cleanly. The only reliable signal is that the
//! `REF` allele of each record no longer matches the reference bases at its
//! position.
//!
//! `assembly-checker` reads every record of a VCF, looks up its position in the
//! reference through the FASTA index, and compares the bases found there with
//! the declared reference allele.
//!
//! ## Features
//!
//! - **Streaming**: the VCF is read line by line, memory use does not grow with it
//! - **Random access**: reference bases are read by offset through the `.fai`
//! - **Genomic comparison**: case-insensitive, `N` matches any base
//! - **Pluggable reports**: text, summary, valid-records VCF, JSON Lines, tracing
//!
//! ## Example
//!
//! ```rust,no_run
//! use assembly_checker::check;
//! use assembly_checker::report::text::TextReportWriter;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let vcf = File::open("calls.vcf").unwrap();
//! let fasta = File::open("GRCh38.fa").unwrap();
//! let fai = BufReader::new(File::open("GRCh38.fa.fai").unwrap());
//!
//! let mut report = TextReportWriter::new(std::io::stdout());
//! let all_match = check(vcf, fasta, fai, &mut [&mut report]).unwrap();
//! println!("verdict: {}", if all_match { "PASS" } else { "FAIL" });
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Index entries, record cores and outcomes
//! - [`parsing`]: FAI, FASTA random access and VCF record extraction
//! - [`matching`]: Sequence comparison and the streaming checker
//! - [`report`]: Report sinks
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::index::{FastaIndex, IndexEntry};
pub use crate::core::outcome::{CheckSummary, MatchOutcome};
pub use crate::core::record::RecordCore;
pub use matching::checker::{check, AssemblyChecker, CheckConfig, CheckError};
pub use report::ReportSink;
