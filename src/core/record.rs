use serde::Serialize;

/// The minimal identity of a variant record needed to check it against a
/// reference: where it is and which bases it claims are there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordCore {
    /// Contig name as written in the record
    pub chromosome: String,

    /// 1-based position of the first reference base
    pub position: u64,

    /// Declared reference allele
    pub reference_allele: String,
}

impl RecordCore {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        reference_allele: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            reference_allele: reference_allele.into(),
        }
    }

    /// Number of reference bases covered by the record
    #[must_use]
    pub fn reference_length(&self) -> u64 {
        self.reference_allele.len() as u64
    }
}

/// A line of the variant input as seen by report sinks.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    /// Line number in the variant input (1-based)
    pub line_number: u64,

    /// Raw line text without its terminator
    pub line: &'a str,
}
