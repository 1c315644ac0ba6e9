use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Layout of a single contig inside a line-wrapped FASTA file, as described by
/// one line of its `.fai` index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Contig name (first word of the FASTA header line)
    pub name: String,

    /// Total number of bases in the contig
    pub length: u64,

    /// Byte offset of the contig's first base in the FASTA file
    pub offset: u64,

    /// Number of bases on each full line
    pub line_bases: u64,

    /// Number of bytes on each full line, including the line terminator
    pub line_width: u64,
}

impl IndexEntry {
    pub fn new(
        name: impl Into<String>,
        length: u64,
        offset: u64,
        line_bases: u64,
        line_width: u64,
    ) -> Self {
        Self {
            name: name.into(),
            length,
            offset,
            line_bases,
            line_width,
        }
    }

    /// Width of the line terminator (1 for `\n`, 2 for `\r\n`)
    #[must_use]
    pub fn terminator_width(&self) -> u64 {
        self.line_width - self.line_bases
    }

    /// Check the layout invariants that random access relies on.
    ///
    /// Returns a description of the first violated invariant, if any.
    #[must_use]
    pub fn layout_problem(&self) -> Option<String> {
        if self.line_width < self.line_bases {
            return Some(format!(
                "line width {} is smaller than bases per line {}",
                self.line_width, self.line_bases
            ));
        }
        if self.length > 0 && self.line_bases == 0 {
            return Some(format!(
                "bases per line must be greater than zero for a contig of length {}",
                self.length
            ));
        }
        None
    }
}

/// All contigs of a FASTA index, keyed by name.
///
/// Entries keep the order in which they appear in the index file.
#[derive(Debug, Clone, Default)]
pub struct FastaIndex {
    entries: Vec<IndexEntry>,
    by_name: HashMap<String, usize>,
}

impl FastaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Returns the entry back if its name is already present.
    pub fn insert(&mut self, entry: IndexEntry) -> Result<(), IndexEntry> {
        if self.by_name.contains_key(&entry.name) {
            return Err(entry);
        }
        self.by_name.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index file order
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }
}
