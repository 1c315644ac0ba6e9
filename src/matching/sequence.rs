//! Comparison of reference bases against a declared reference allele.

use crate::utils::validation::is_wildcard_base;

/// Check whether bases read from the reference match a declared allele.
///
/// Sequences of different lengths never match. Comparison ignores ASCII case,
/// and an `N` in either sequence matches any base at the same position.
///
/// # Examples
///
/// ```
/// use assembly_checker::matching::sequence::is_matching_sequence;
///
/// assert!(is_matching_sequence(b"ACGT", b"acgt"));
/// assert!(is_matching_sequence(b"ACNT", b"ACGT"));
/// assert!(!is_matching_sequence(b"ACGT", b"ACG"));
/// ```
#[must_use]
pub fn is_matching_sequence(reference: &[u8], declared: &[u8]) -> bool {
    reference.len() == declared.len()
        && reference
            .iter()
            .zip(declared)
            .all(|(&r, &d)| is_wildcard_base(r) || is_wildcard_base(d) || r.eq_ignore_ascii_case(&d))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASES: &[u8] = b"ACGTacgtRYSWKMBDHVryswkmbdhv";

    #[test]
    fn test_identical_sequences_match() {
        assert!(is_matching_sequence(b"ACGT", b"ACGT"));
        assert!(is_matching_sequence(b"", b""));
    }

    #[test]
    fn test_case_insensitive() {
        for seq in [&b"ACGT"[..], b"acgtn", b"AcGtRyKm", b"TTTTgggg"] {
            let upper = seq.to_ascii_uppercase();
            let lower = seq.to_ascii_lowercase();
            assert!(is_matching_sequence(seq, &upper));
            assert!(is_matching_sequence(&upper, seq));
            assert!(is_matching_sequence(&lower, &upper));
        }
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!is_matching_sequence(b"ACGT", b"ACGTA"));
        assert!(!is_matching_sequence(b"ACGTA", b"ACGT"));
        assert!(!is_matching_sequence(b"N", b"NN"));
        assert!(!is_matching_sequence(b"", b"A"));
    }

    #[test]
    fn test_single_base_difference() {
        assert!(!is_matching_sequence(b"ACGT", b"ACGG"));
        assert!(!is_matching_sequence(b"acgt", b"ACGA"));
    }

    #[test]
    fn test_wildcard_in_reference_matches_any_base() {
        for &base in BASES {
            let declared = [b'A', base, b'T'];
            assert!(is_matching_sequence(b"ANT", &declared));
            assert!(is_matching_sequence(b"AnT", &declared));
        }
    }

    #[test]
    fn test_wildcard_in_declared_matches_any_base() {
        for &base in BASES {
            let reference = [b'G', b'G', base];
            assert!(is_matching_sequence(&reference, b"GGN"));
            assert!(is_matching_sequence(&reference, b"ggn"));
        }
    }

    #[test]
    fn test_wildcard_does_not_mask_other_positions() {
        assert!(!is_matching_sequence(b"NCGT", b"ACGA"));
        assert!(!is_matching_sequence(b"ACGT", b"NNGA"));
    }

    #[test]
    fn test_other_ambiguity_codes_are_literal() {
        assert!(is_matching_sequence(b"ARG", b"Arg"));
        assert!(!is_matching_sequence(b"ARG", b"AAG"));
        assert!(!is_matching_sequence(b"AAG", b"ARG"));
    }
}
