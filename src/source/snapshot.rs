use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::encoding::TextEncoding;
use crate::error::{BrDomainError, Result, SourceErrorKind};
use crate::types::SuffixRecord;

use super::SuffixSource;

/// Column every snapshot must carry
const TLD_COLUMN: &str = "tld";

/// Read suffix records from CSV with a header row.
///
/// Only the `tld` column is required; `title`, `description`, `target` and
/// `restriction` are read when present. Rows with an empty `tld` are skipped.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<SuffixRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?;
    if !headers.iter().any(|h| h.trim() == TLD_COLUMN) {
        return Err(BrDomainError::source_error(
            SourceErrorKind::InvalidData,
            format!("snapshot has no '{}' column", TLD_COLUMN),
        ));
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let mut record: SuffixRecord = row?;
        record.tld = record.tld.trim().to_string();
        if record.tld.is_empty() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Write suffix records as CSV with header
/// `tld,title,description,target,restriction`.
pub fn write_records<W: Write>(writer: W, records: &[SuffixRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Suffix source backed by a CSV snapshot file
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    encoding: TextEncoding,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: TextEncoding::default(),
        }
    }

    /// Set the snapshot text encoding (default UTF-8)
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `records` to the snapshot path, replacing any previous content.
    /// Snapshots are always written as UTF-8.
    pub fn save(&self, records: &[SuffixRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&self.path).map_err(|e| {
            BrDomainError::source_error(
                SourceErrorKind::FileError,
                format!("Failed to create '{}': {}", self.path.display(), e),
            )
        })?;
        write_records(file, records)?;

        info!(
            "Wrote {} suffix records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl SuffixSource for CsvSource {
    fn load_records(&self) -> Result<Vec<SuffixRecord>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            BrDomainError::source_error(
                SourceErrorKind::FileError,
                format!("Failed to read '{}': {}", self.path.display(), e),
            )
        })?;

        let text = self.encoding.decode(&bytes)?;
        let records = read_records(text.as_bytes())?;
        debug!(
            "Loaded {} suffix records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
