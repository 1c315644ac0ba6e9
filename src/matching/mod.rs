//! Checking variant records against reference bases.
//!
//! - [`sequence::is_matching_sequence`]: the base-by-base comparison rule
//! - [`checker::AssemblyChecker`]: streams a variant file, looks every record
//!   up in the reference and reports the outcome
//!
//! ## Matching Rule
//!
//! A declared reference allele matches the reference bases when:
//!
//! 1. both have the same length,
//! 2. at every position the bases are equal ignoring case, or
//! 3. either base at that position is the wildcard `N`.
//!
//! ## Example
//!
//! ```rust
//! use assembly_checker::matching::checker::check;
//! use assembly_checker::report::CollectingSink;
//! use std::io::Cursor;
//!
//! let fasta = b">chr1\nACGTACGT\nACGT\n".to_vec();
//! let fai = "chr1\t12\t6\t8\t9\n";
//! let vcf = "##fileformat=VCFv4.2\nchr1\t7\t.\tGTAC\tG\n";
//!
//! let mut sink = CollectingSink::new();
//! let verdict = check(vcf.as_bytes(), Cursor::new(fasta), fai.as_bytes(), &mut [&mut sink]).unwrap();
//! assert!(verdict);
//! ```

pub mod checker;
pub mod sequence;

pub use checker::{AssemblyChecker, CheckConfig, CheckError, MalformedRecordPolicy};
