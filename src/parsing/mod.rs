//! Readers for the three inputs of an assembly check.
//!
//! - **FASTA index (.fai)**: contig layout used for random access
//! - **FASTA**: reference bases, read by offset through the index
//! - **VCF**: contig, position and reference allele of each data line
//!
//! ## Example
//!
//! ```rust
//! use assembly_checker::parsing::{fai, fasta, vcf};
//! use std::io::Cursor;
//!
//! let index = fai::parse_fai_text("chr1\t12\t6\t8\t9\n").unwrap();
//! let mut reference = Cursor::new(b">chr1\nACGTACGT\nACGT\n".to_vec());
//!
//! let record = vcf::extract("chr1\t8\t.\tTA\tT", 1).unwrap().unwrap();
//! let entry = index.get(&record.chromosome).unwrap();
//! let bases = fasta::read_slice(&mut reference, entry, record.position, 2).unwrap();
//! assert_eq!(bases, b"TA");
//! ```

pub mod fai;
pub mod fasta;
pub mod vcf;
