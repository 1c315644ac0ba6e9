use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::index::FastaIndex;
use crate::parsing::fai::{build_fai, write_fai};
use crate::utils::validation::is_gzipped;

#[derive(Args)]
pub struct FaidxArgs {
    /// FASTA file to index (uncompressed)
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// Output path (default: <fasta>.fai)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute faidx subcommand
///
/// # Errors
///
/// Returns an error if the FASTA cannot be indexed or the index cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FaidxArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if is_gzipped(&args.fasta) {
        anyhow::bail!(
            "Compressed FASTA {} cannot be indexed for random access, decompress it first",
            args.fasta.display()
        );
    }

    let index = build_fai(&args.fasta)
        .with_context(|| format!("Failed to index {}", args.fasta.display()))?;

    let output = args.output.clone().unwrap_or_else(|| {
        let mut path = args.fasta.clone().into_os_string();
        path.push(".fai");
        PathBuf::from(path)
    });

    let writer = File::create(&output)
        .map(BufWriter::new)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_fai(writer, &index).with_context(|| format!("Failed to write {}", output.display()))?;

    if verbose {
        eprintln!("Wrote {}", output.display());
    }

    match format {
        OutputFormat::Text => print_text_index(&index, &output),
        OutputFormat::Json => print_json_index(&index, &output)?,
        OutputFormat::Tsv => print_tsv_index(&index),
    }

    Ok(())
}

fn print_text_index(index: &FastaIndex, output: &std::path::Path) {
    let total: u64 = index.iter().map(|e| e.length).sum();
    println!(
        "Indexed {} contigs ({total} bases) to {}",
        index.len(),
        output.display()
    );
}

fn print_json_index(index: &FastaIndex, output: &std::path::Path) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "index": output.display().to_string(),
        "contigs": index.iter().collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_index(index: &FastaIndex) {
    println!("name\tlength\toffset\tline_bases\tline_width");
    for entry in index.iter() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            entry.name, entry.length, entry.offset, entry.line_bases, entry.line_width
        );
    }
}
