//! Command-line interface for assembly-checker.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **check**: Check a VCF against an indexed FASTA reference
//! - **faidx**: Write the `.fai` index of a FASTA file
//!
//! ## Usage
//!
//! ```text
//! # Check a VCF, writing a text report of every failing record
//! assembly-checker check -i calls.vcf.gz -r GRCh38.fa --report text
//!
//! # Pipe from bcftools, summary as JSON
//! bcftools view calls.bcf | assembly-checker --format json check -i - -r GRCh38.fa
//!
//! # Index a reference ahead of time
//! assembly-checker faidx GRCh38.fa
//! ```
//!
//! ## Exit Status
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | every record matched the reference |
//! | 1 | at least one record did not match |
//! | 2 | the check could not be run |

use clap::{Parser, Subcommand};

pub mod check;
pub mod faidx;

#[derive(Parser)]
#[command(name = "assembly-checker")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Check that VCF reference alleles match an indexed FASTA reference")]
#[command(
    long_about = "assembly-checker verifies that every record of a VCF file was called against the given reference assembly.\n\nFor each record, the bases at CHROM:POS in the FASTA are compared with the REF allele:\n- Case is ignored\n- N matches any base\n- Records on unknown contigs or past the end of a contig are reported as failures"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a VCF file against a reference FASTA
    Check(check::CheckArgs),

    /// Write the .fai index of a FASTA file
    Faidx(faidx::FaidxArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
