//! Resource limit tests
//!
//! Inputs that are large or hostile must either be processed in bounded memory
//! or rejected with an error, never panic.

use std::fmt::Write as _;
use std::io::Cursor;

use assembly_checker::matching::checker::MalformedRecordPolicy;
use assembly_checker::parsing::fai::{parse_fai_text, IndexError};
use assembly_checker::report::CollectingSink;
use assembly_checker::utils::validation::MAX_CONTIGS;
use assembly_checker::{check, AssemblyChecker, CheckConfig, MatchOutcome};

#[test]
fn test_index_contig_limit() {
    let mut fai = String::new();
    for i in 0..=MAX_CONTIGS {
        writeln!(fai, "contig{i}\t10\t{}\t10\t11", i * 20).unwrap();
    }

    match parse_fai_text(&fai) {
        Err(IndexError::TooManyContigs(count)) => assert_eq!(count, MAX_CONTIGS),
        other => panic!("expected TooManyContigs, got {other:?}"),
    }
}

#[test]
fn test_offsets_near_u64_max_do_not_overflow() {
    let fai = format!("chr1\t{}\t{}\t60\t61\n", u64::MAX, u64::MAX - 10);
    let mut sink = CollectingSink::new();

    // Past the contig end, then inside the contig but past any possible file offset
    let vcf = format!("chr1\t{}\t.\tACGT\t.\nchr1\t61\t.\tA\t.\n", u64::MAX - 1);

    let verdict = check(
        vcf.as_bytes(),
        Cursor::new(b">chr1\nACGT\n".to_vec()),
        fai.as_bytes(),
        &mut [&mut sink],
    )
    .unwrap();

    assert!(!verdict);
    assert_eq!(sink.outcomes.len(), 2);
    for (_, outcome) in &sink.outcomes {
        assert!(matches!(outcome, MatchOutcome::OutOfBounds { .. }));
    }
}

#[test]
fn test_line_longer_than_read_buffer() {
    let index = parse_fai_text("chr1\t4\t6\t4\t5\n").unwrap();
    let info = "X".repeat(10_000);
    let vcf = format!("chr1\t1\t.\tACGT\t.\t.\tPASS\t{info}\n");

    let mut sink = CollectingSink::new();
    let config = CheckConfig {
        line_buffer_size: 16,
        ..CheckConfig::default()
    };
    let verdict = AssemblyChecker::new(index, Cursor::new(b">chr1\nACGT\n".to_vec()))
        .with_config(config)
        .check(vcf.as_bytes(), &mut [&mut sink])
        .unwrap();

    assert!(verdict);
    assert_eq!(sink.outcomes, vec![(1, MatchOutcome::Match)]);
}

#[test]
fn test_many_malformed_lines_are_reported_not_fatal() {
    let index = parse_fai_text("chr1\t4\t6\t4\t5\n").unwrap();
    let vcf = "garbage\n".repeat(1_000);

    let mut sink = CollectingSink::new();
    let config = CheckConfig {
        malformed_policy: MalformedRecordPolicy::Report,
        ..CheckConfig::default()
    };
    let verdict = AssemblyChecker::new(index, Cursor::new(b">chr1\nACGT\n".to_vec()))
        .with_config(config)
        .check(vcf.as_bytes(), &mut [&mut sink])
        .unwrap();

    assert!(!verdict);
    assert_eq!(sink.summary.unwrap().malformed, 1_000);
}
