use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use flate2::read::MultiGzDecoder;
use tracing::{debug, info, warn};

use crate::cli::OutputFormat;
use crate::core::index::FastaIndex;
use crate::core::outcome::{CheckSummary, MatchOutcome};
use crate::core::record::RecordContext;
use crate::matching::checker::{AssemblyChecker, CheckConfig, MalformedRecordPolicy};
use crate::parsing;
use crate::report::json::JsonReportWriter;
use crate::report::log::LogReporter;
use crate::report::summary::{write_summary, SummaryReportWriter};
use crate::report::text::TextReportWriter;
use crate::report::valid::ValidRecordsWriter;
use crate::report::ReportSink;
use crate::utils::validation::is_gzipped;

#[derive(Args)]
pub struct CheckArgs {
    /// Input VCF file, optionally gzip or bgzip compressed
    /// Use '-' for stdin
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Reference FASTA file (uncompressed)
    #[arg(short, long, required = true)]
    pub reference: PathBuf,

    /// FASTA index (default: <reference>.fai, built from the FASTA if missing)
    #[arg(long)]
    pub fai: Option<PathBuf>,

    /// Report files to write (comma-separated)
    #[arg(long = "report", value_enum, value_delimiter = ',')]
    pub reports: Vec<ReportKind>,

    /// Directory to write report files into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Stop at the first malformed record instead of reporting it and continuing
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    /// Totals and verdict
    Summary,
    /// One line per failing record
    Text,
    /// Header and matching records as VCF
    Valid,
    /// JSON Lines, one object per failing record plus a summary
    Json,
}

impl ReportKind {
    fn file_name(self, stem: &str, timestamp: &str) -> String {
        let (kind, ext) = match self {
            ReportKind::Summary => ("summary", "txt"),
            ReportKind::Text => ("text", "txt"),
            ReportKind::Valid => ("valid", "vcf"),
            ReportKind::Json => ("json", "jsonl"),
        };
        format!("{stem}.{kind}_assembly_report.{timestamp}.{ext}")
    }

    fn open(self, path: &Path) -> io::Result<Box<dyn ReportSink>> {
        let writer = BufWriter::new(File::create(path)?);
        Ok(match self {
            ReportKind::Summary => Box::new(SummaryReportWriter::new(writer)),
            ReportKind::Text => Box::new(TextReportWriter::new(writer)),
            ReportKind::Valid => Box::new(ValidRecordsWriter::new(writer)),
            ReportKind::Json => Box::new(JsonReportWriter::new(writer)),
        })
    }
}

/// Keeps the final summary of a run for printing.
#[derive(Default)]
struct SummaryCapture {
    summary: Option<CheckSummary>,
}

impl ReportSink for SummaryCapture {
    fn record(&mut self, _context: &RecordContext<'_>, _outcome: &MatchOutcome) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, summary: &CheckSummary) -> io::Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

/// Execute check subcommand
///
/// Returns the verdict: `true` if every record matched the reference.
///
/// # Errors
///
/// Returns an error if an input cannot be opened, the index is malformed, a
/// report cannot be written, or the check aborts.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<bool> {
    if is_gzipped(&args.reference) {
        anyhow::bail!(
            "Compressed reference {} is not supported, decompress it first",
            args.reference.display()
        );
    }
    if !parsing::fasta::is_fasta_file(&args.reference) {
        warn!(
            reference = %args.reference.display(),
            "Reference does not have a FASTA extension (.fa, .fasta, .fna)"
        );
    }

    let index = load_index(&args)?;
    if verbose {
        eprintln!("Loaded index with {} contigs", index.len());
    }

    let reference = File::open(&args.reference)
        .with_context(|| format!("Failed to open reference {}", args.reference.display()))?;
    let variants = open_variants(&args.input)?;

    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    let stem = input_stem(&args.input);
    let mut report_paths = Vec::new();
    let mut report_sinks = Vec::new();
    for kind in dedup(&args.reports) {
        let path = args.output_dir.join(kind.file_name(&stem, &timestamp));
        let sink = kind
            .open(&path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        debug!(report = %path.display(), "Writing report");
        report_paths.push(path);
        report_sinks.push(sink);
    }

    let mut capture = SummaryCapture::default();
    let mut log = LogReporter::new();
    let mut sinks: Vec<&mut dyn ReportSink> = Vec::new();
    sinks.push(&mut capture);
    if verbose {
        sinks.push(&mut log);
    }
    for sink in &mut report_sinks {
        sinks.push(&mut **sink);
    }

    let config = CheckConfig {
        malformed_policy: if args.strict {
            MalformedRecordPolicy::Abort
        } else {
            MalformedRecordPolicy::Report
        },
        ..CheckConfig::default()
    };

    info!(
        input = %args.input.display(),
        reference = %args.reference.display(),
        "Checking records"
    );
    let verdict = AssemblyChecker::new(index, reference)
        .with_config(config)
        .check(variants, &mut sinks)
        .with_context(|| format!("Assembly check of {} aborted", args.input.display()))?;
    drop(sinks);

    let summary = capture.summary.unwrap_or_default();
    match format {
        OutputFormat::Text => print_text_summary(&args, &summary, &report_paths)?,
        OutputFormat::Json => print_json_summary(&args, &summary, &report_paths)?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(verdict)
}

fn load_index(args: &CheckArgs) -> anyhow::Result<FastaIndex> {
    let fai_path = args.fai.clone().unwrap_or_else(|| {
        let mut path = args.reference.clone().into_os_string();
        path.push(".fai");
        PathBuf::from(path)
    });

    if fai_path.exists() {
        return parsing::fai::parse_fai_file(&fai_path)
            .with_context(|| format!("Failed to read index {}", fai_path.display()));
    }
    if args.fai.is_some() {
        anyhow::bail!("Index {} does not exist", fai_path.display());
    }

    info!(
        reference = %args.reference.display(),
        "No .fai index found, indexing the reference"
    );
    parsing::fai::build_fai(&args.reference)
        .with_context(|| format!("Failed to index reference {}", args.reference.display()))
}

/// Open the variant input, decompressing gzip and bgzip transparently
fn open_variants(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path.to_string_lossy() == "-" {
        return Ok(Box::new(io::stdin()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open variant input {}", path.display()))?;

    if is_gzipped(path) {
        // bgzip output is a series of gzip members
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// File name used as the prefix of report files
fn input_stem(path: &Path) -> String {
    if path.to_string_lossy() == "-" {
        return "stdin".to_string();
    }
    path.file_name()
        .map_or_else(|| "input".to_string(), |n| n.to_string_lossy().to_string())
}

fn dedup(kinds: &[ReportKind]) -> Vec<ReportKind> {
    let mut unique = Vec::new();
    for kind in kinds {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }
    unique
}

fn print_text_summary(
    args: &CheckArgs,
    summary: &CheckSummary,
    reports: &[PathBuf],
) -> anyhow::Result<()> {
    println!("Assembly Check");
    println!("{}", "=".repeat(60));
    println!("Input: {}", args.input.display());
    println!("Reference: {}", args.reference.display());
    println!();

    write_summary(&mut io::stdout().lock(), summary)?;

    if !reports.is_empty() {
        println!("\nReports:");
        for path in reports {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn print_json_summary(
    args: &CheckArgs,
    summary: &CheckSummary,
    reports: &[PathBuf],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "reference": args.reference.display().to_string(),
        "summary": summary,
        "match_percentage": summary.match_percentage(),
        "verdict": summary.verdict(),
        "reports": reports
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &CheckSummary) {
    println!("records\tmatches\tmismatches\tunknown_contigs\tout_of_bounds\tmalformed\tverdict");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        summary.records,
        summary.matches,
        summary.mismatches,
        summary.unknown_contigs,
        summary.out_of_bounds,
        summary.malformed,
        if summary.verdict() { "PASS" } else { "FAIL" },
    );
}
