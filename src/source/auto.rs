use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};

use crate::error::{BrDomainError, Result, SourceErrorKind};
use crate::types::{SuffixRecord, SuffixSet};

use super::registro::RegistroSource;
use super::snapshot::CsvSource;
use super::SuffixSource;

/// Default update interval: 7 days
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Snapshot file name inside the data directory
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "br-tlds.csv";

/// Suffix source that keeps a local CSV snapshot of the registro.br list and
/// refreshes it when it gets older than the update interval.
///
/// A failed refresh falls back to the existing snapshot; it is only an error
/// when there is no snapshot at all.
pub struct AutoSuffixSource {
    pub data_dir: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub url: String,
    pub update_interval: Duration,

    records: RwLock<Option<Vec<SuffixRecord>>>,
    download_lock: Mutex<()>,
}

impl AutoSuffixSource {
    pub fn new() -> Self {
        Self {
            data_dir: None,
            snapshot_path: None,
            url: super::DEFAULT_CATEGORIES_URL.to_string(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            records: RwLock::new(None),
            download_lock: Mutex::new(()),
        }
    }

    /// Set data directory holding the snapshot
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an explicit snapshot path (overrides the data directory)
    pub fn with_snapshot_path(mut self, path: impl AsRef<Path>) -> Self {
        self.snapshot_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set custom categories page URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set update interval for checking snapshot freshness
    /// Default is 7 days (DEFAULT_UPDATE_INTERVAL)
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Resolved snapshot path
    pub fn get_snapshot_path(&self) -> PathBuf {
        if let Some(ref path) = self.snapshot_path {
            return path.clone();
        }

        match self.data_dir {
            Some(ref dir) => dir.join(DEFAULT_SNAPSHOT_FILENAME),
            None => PathBuf::from(DEFAULT_SNAPSHOT_FILENAME),
        }
    }

    /// Check if the snapshot is missing, empty or stale
    fn should_download(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => {
                if meta.len() == 0 {
                    return true;
                }
                match meta.modified() {
                    Ok(mtime) => SystemTime::now()
                        .duration_since(mtime)
                        .map(|d| d > self.update_interval)
                        .unwrap_or(true),
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }

    /// Scrape the live page into a fresh snapshot
    fn download(&self, path: &Path) -> Result<()> {
        let _lock = self.download_lock.lock();

        // Double-check after acquiring lock
        if !self.should_download(path) {
            return Ok(());
        }

        let records = RegistroSource::new().with_url(self.url.as_str()).load_records()?;
        install_snapshot(&records, path)?;

        info!("Updated suffix snapshot {}", path.display());
        Ok(())
    }

    /// Ensure the snapshot exists, refreshing it if needed
    fn ensure_snapshot(&self) -> Result<PathBuf> {
        let path = self.get_snapshot_path();
        debug!("Checking suffix snapshot: {}", path.display());

        if self.should_download(&path) {
            if let Err(e) = self.download(&path) {
                if !path.exists() {
                    return Err(e);
                }
                warn!("Suffix list refresh failed, using existing snapshot: {}", e);
            }
        }

        Ok(path)
    }
}

/// Verify `records`, write them next to `path` and move them into place.
/// No temporary file is left behind on failure.
fn install_snapshot(records: &[SuffixRecord], path: &Path) -> Result<()> {
    // Reject anything that would not build a matcher
    SuffixSet::from_suffixes(records.iter().map(|r| r.tld.as_str())).map_err(|e| {
        BrDomainError::source_error(
            SourceErrorKind::InvalidData,
            format!("Verification failed: {}", e),
        )
    })?;

    let tmp_path = path.with_extension("tmp");
    if let Err(e) = CsvSource::new(&tmp_path).save(records) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

impl Default for AutoSuffixSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixSource for AutoSuffixSource {
    fn load_records(&self) -> Result<Vec<SuffixRecord>> {
        if let Some(ref records) = *self.records.read() {
            return Ok(records.clone());
        }

        let path = self.ensure_snapshot()?;
        let records = CsvSource::new(&path).load_records()?;
        *self.records.write() = Some(records.clone());
        Ok(records)
    }
}
