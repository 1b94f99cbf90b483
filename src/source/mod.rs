//! Providers of the `.br` suffix list.
//!
//! A matcher only needs a [`SuffixSet`]; where it came from (memory, a CSV
//! snapshot, or the live registro.br categories page) is hidden behind
//! [`SuffixSource`].

pub mod auto;
pub mod registro;
pub mod snapshot;

pub use self::auto::{AutoSuffixSource, DEFAULT_SNAPSHOT_FILENAME, DEFAULT_UPDATE_INTERVAL};
pub use self::registro::{parse_categories, RegistroSource, DEFAULT_CATEGORIES_URL};
pub use self::snapshot::{read_records, write_records, CsvSource};

use crate::error::Result;
use crate::types::{SuffixRecord, SuffixSet};

/// Trait for loading the suffix list
pub trait SuffixSource: Send + Sync {
    /// Load every listed category record
    fn load_records(&self) -> Result<Vec<SuffixRecord>>;

    /// Load the validated suffix set
    fn load_suffixes(&self) -> Result<SuffixSet> {
        let records = self.load_records()?;
        SuffixSet::from_suffixes(records.iter().map(|r| r.tld.as_str()))
    }
}

/// In-memory suffix source
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    suffixes: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl SuffixSource for MemorySource {
    fn load_records(&self) -> Result<Vec<SuffixRecord>> {
        Ok(self
            .suffixes
            .iter()
            .map(|tld| SuffixRecord::from_tld(tld.as_str()))
            .collect())
    }
}
