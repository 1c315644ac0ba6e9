//! Centralized validation and helper functions.

use std::path::Path;

/// Maximum number of contigs allowed in a single index (DOS protection)
pub const MAX_CONTIGS: usize = 100_000;

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_contig_limit(index.len()).is_some() {
///     return Err(...);
/// }
/// index.insert(entry); // Safe to add
/// ```
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Check if the path is a gzip or bgzip compressed file
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Check whether `base` is the ambiguity code standing for any nucleotide.
///
/// # Examples
///
/// ```
/// use assembly_checker::utils::validation::is_wildcard_base;
///
/// assert!(is_wildcard_base(b'N'));
/// assert!(is_wildcard_base(b'n'));
/// assert!(!is_wildcard_base(b'A'));
/// ```
#[must_use]
pub fn is_wildcard_base(base: u8) -> bool {
    base.eq_ignore_ascii_case(&b'N')
}
