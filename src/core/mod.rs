//! Core data types for assembly checking.
//!
//! - [`IndexEntry`](index::IndexEntry) / [`FastaIndex`](index::FastaIndex): the
//!   layout of each contig in a line-wrapped FASTA, as read from its `.fai`
//! - [`RecordCore`](record::RecordCore): the contig, position and reference
//!   allele of one variant record
//! - [`MatchOutcome`](outcome::MatchOutcome): what happened when one record was
//!   checked, and [`CheckSummary`](outcome::CheckSummary) for a whole run
//!
//! ## Coordinates
//!
//! | Value | Basis |
//! |-------|-------|
//! | `RecordCore::position` | 1-based, as in VCF `POS` |
//! | base offset inside a contig | 0-based (`position - 1`) |
//! | `IndexEntry::offset` | 0-based byte offset into the FASTA file |

pub mod index;
pub mod outcome;
pub mod record;
