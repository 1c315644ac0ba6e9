//! Random access to bases of a line-wrapped FASTA file through its index.
//!
//! A FASTA file stores each contig as fixed-width lines:
//!
//! ```text
//! >chr1            <- header, skipped by the index offset
//! ACGTACGTAC\n     <- line_bases = 10, line_width = 11
//! GTACGTACGT\n
//! ACG\n            <- last line may be shorter
//! ```
//!
//! The byte holding the base at 0-based offset `b` of a contig is
//! `offset + (b / line_bases) * line_width + b % line_bases`. A slice read from
//! there spans `(column + length - 1) / line_bases` line terminators, which are
//! skipped by position rather than by value, so they never end up in the
//! returned bases.

use std::ffi::OsStr;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;

use crate::core::index::IndexEntry;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "{length} base(s) at {contig}:{position} fall outside the contig (length {contig_length})"
    )]
    OutOfBounds {
        contig: String,
        position: u64,
        length: u64,
        contig_length: u64,
    },

    #[error("Reference file ends early: needed {needed} bytes at offset {offset} for '{contig}', found {found}")]
    Truncated {
        contig: String,
        offset: u64,
        needed: u64,
        found: u64,
    },
}

/// A byte source readable at explicit offsets.
///
/// Each call names the offset it reads from; callers never rely on a cursor
/// left behind by an earlier call.
pub trait ReadAt {
    /// Read up to `len` bytes starting at `offset`.
    ///
    /// Fewer bytes are returned only when the source ends first.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying source.
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>>;
}

impl<R: Read + Seek> ReadAt for R {
    fn read_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.seek(SeekFrom::Start(offset))?;
        let mut buffer = Vec::with_capacity(len);
        self.by_ref().take(len as u64).read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Check if the path has a FASTA extension (`.fa`, `.fasta`, `.fna`)
pub fn is_fasta_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Read `length` bases of a contig starting at the 1-based `position`.
///
/// # Errors
///
/// Returns `SliceError::OutOfBounds` if `position` is 0 or the slice ends past
/// the end of the contig, `SliceError::Truncated` if the source ends before the
/// bases the index promises, and `SliceError::Io` if reading fails.
pub fn read_slice<S: ReadAt + ?Sized>(
    source: &mut S,
    entry: &IndexEntry,
    position: u64,
    length: u64,
) -> Result<Vec<u8>, SliceError> {
    let out_of_bounds = || SliceError::OutOfBounds {
        contig: entry.name.clone(),
        position,
        length,
        contig_length: entry.length,
    };

    let base_offset = position.checked_sub(1).ok_or_else(out_of_bounds)?;
    let end = base_offset.checked_add(length).ok_or_else(out_of_bounds)?;
    if end > entry.length {
        return Err(out_of_bounds());
    }
    if length == 0 {
        return Ok(Vec::new());
    }
    if entry.line_bases == 0 || entry.line_width < entry.line_bases {
        // Layout cannot hold bases; the index lies about this contig
        return Err(out_of_bounds());
    }

    let line = base_offset / entry.line_bases;
    let column = base_offset % entry.line_bases;
    let wraps = (column + length - 1) / entry.line_bases;

    // No file can hold bytes past u64::MAX
    let beyond_file = || SliceError::Truncated {
        contig: entry.name.clone(),
        offset: entry.offset,
        needed: length,
        found: 0,
    };
    let start = line
        .checked_mul(entry.line_width)
        .and_then(|n| n.checked_add(entry.offset))
        .and_then(|n| n.checked_add(column))
        .ok_or_else(beyond_file)?;
    let needed = wraps
        .checked_mul(entry.terminator_width())
        .and_then(|n| n.checked_add(length))
        .filter(|n| start.checked_add(*n).is_some())
        .ok_or_else(beyond_file)?;

    let truncated = |found: usize| SliceError::Truncated {
        contig: entry.name.clone(),
        offset: start,
        needed,
        found: found as u64,
    };

    let window_len = usize::try_from(needed).map_err(|_| truncated(0))?;
    let window = source.read_at(start, window_len)?;
    if window.len() < window_len {
        return Err(truncated(window.len()));
    }

    Ok(unwrap_lines(&window, entry, column, length))
}

/// Copy `length` bases out of a window that starts `column` bases into a line,
/// dropping the terminator bytes at each wrap.
#[allow(clippy::cast_possible_truncation)] // Bounded by the window length
fn unwrap_lines(window: &[u8], entry: &IndexEntry, column: u64, length: u64) -> Vec<u8> {
    let line_bases = entry.line_bases as usize;
    let terminator = entry.terminator_width() as usize;
    let length = length as usize;

    let mut bases = Vec::with_capacity(length);
    let mut at = 0;
    let mut column = column as usize;

    while bases.len() < length {
        let take = (line_bases - column).min(length - bases.len());
        bases.extend_from_slice(&window[at..at + take]);
        at += take + terminator;
        column = 0;
    }

    bases
}
