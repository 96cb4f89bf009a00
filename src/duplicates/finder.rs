//! Duplicate finder: walk, fingerprint, group.
//!
//! # Overview
//!
//! [`DuplicateFinder`] validates the root directory, walks it once, and
//! fingerprints each regular file as it is discovered. Fingerprinted files
//! are grouped with [`group_by_fingerprint`](super::group_by_fingerprint)
//! and singleton groups are dropped.
//!
//! A bad root is the only hard failure. Anything that goes wrong with an
//! individual file or subdirectory is recorded in
//! [`ScanSummary::skipped`] and the scan carries on.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! for group in &groups {
//!     println!("{}: {} copies", group.fingerprint, group.len());
//! }
//! println!("{} items skipped", summary.skipped.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::groups::{group_by_fingerprint, DuplicateGroup};
use crate::progress::ProgressCallback;
use crate::scanner::{
    FileEntry, Fingerprint, HashError, Hasher, ScanError, Walker, CHUNK_SIZE,
};

/// Name of the single scan phase reported to progress callbacks.
pub const SCAN_PHASE: &str = "scanning";

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Read block size used when fingerprinting.
    pub chunk_size: usize,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("chunk_size", &self.chunk_size)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the read block size (minimum 1 byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of regular files discovered
    pub total_files: usize,
    /// Number of files successfully fingerprinted
    pub fingerprinted_files: usize,
    /// Total size of all fingerprinted files in bytes
    pub total_size: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Space that could be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Items that could not be read, in the order they were hit
    pub skipped: Vec<ScanError>,
}

impl ScanSummary {
    /// Whether any item was skipped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }
}

/// Errors that abort a scan before traversal starts.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The provided directory exists but cannot be accessed or listed.
    #[error("Cannot access {path}: {source}")]
    RootInaccessible {
        /// The root directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Duplicate finder over a directory tree.
///
/// # Example
///
/// ```no_run
/// use dupefinder::duplicates::{DuplicateFinder, FinderConfig};
/// use std::path::Path;
///
/// let finder = DuplicateFinder::new(FinderConfig::default());
/// match finder.find_duplicates(Path::new(".")) {
///     Ok((groups, summary)) => {
///         println!("Found {} duplicate groups", groups.len());
///         println!("Can reclaim {}", summary.reclaimable_display());
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_chunk_size(config.chunk_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under `path`.
    ///
    /// # Returns
    ///
    /// A tuple of:
    /// - `Vec<DuplicateGroup>` - Groups of 2+ files with identical content
    /// - `ScanSummary` - Statistics and the skipped-items list
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if the path does not exist, is not a directory,
    /// or cannot be listed. Nothing is traversed in that case.
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        validate_root(path)?;

        log::info!("Starting duplicate scan of {}", path.display());

        let mut summary = ScanSummary::default();
        let mut fingerprinted = Vec::new();

        let mut walker = Walker::new(path);
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(SCAN_PHASE, 0);
            walker = walker.with_progress_callback(callback.clone());
        }

        for result in walker.walk() {
            match result {
                Ok(file) => {
                    summary.total_files += 1;
                    self.fingerprint_into(file, &mut fingerprinted, &mut summary);
                }
                Err(e) => summary.skipped.push(e),
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(SCAN_PHASE);
        }

        Ok(self.finish(fingerprinted, summary, start_time))
    }

    /// Find duplicates among a pre-collected list of files.
    ///
    /// Files are fingerprinted in the order given, which is also the order
    /// they appear in within each group.
    ///
    /// # Errors
    ///
    /// Currently infallible; unreadable files go to the skipped list.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<FileEntry>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary {
            total_files: files.len(),
            ..Default::default()
        };
        let mut fingerprinted = Vec::with_capacity(files.len());

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(SCAN_PHASE, files.len());
        }

        for (i, file) in files.into_iter().enumerate() {
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(i + 1, &file.path.to_string_lossy());
            }
            self.fingerprint_into(file, &mut fingerprinted, &mut summary);
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(SCAN_PHASE);
        }

        Ok(self.finish(fingerprinted, summary, start_time))
    }

    /// Fingerprint one file, recording success or the skip reason.
    fn fingerprint_into(
        &self,
        file: FileEntry,
        fingerprinted: &mut Vec<(Fingerprint, FileEntry)>,
        summary: &mut ScanSummary,
    ) {
        match self.hasher.fingerprint(&file.path) {
            Ok(fingerprint) => {
                log::trace!("{} {}", fingerprint, file.path.display());
                summary.fingerprinted_files += 1;
                summary.total_size += file.size;
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_item_completed(file.size);
                }
                fingerprinted.push((fingerprint, file));
            }
            Err(e) => {
                if let HashError::NotFound(p) = &e {
                    log::debug!("File vanished before hashing: {}", p.display());
                } else {
                    log::warn!("Skipping {}", e);
                }
                summary.skipped.push(ScanError::from(e));
            }
        }
    }

    fn finish(
        &self,
        fingerprinted: Vec<(Fingerprint, FileEntry)>,
        mut summary: ScanSummary,
        start_time: Instant,
    ) -> (Vec<DuplicateGroup>, ScanSummary) {
        let (groups, _stats) = group_by_fingerprint(fingerprinted);

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} files, {} duplicate groups, {} reclaimable, {} skipped",
            summary.fingerprinted_files,
            summary.duplicate_groups,
            summary.reclaimable_display(),
            summary.skipped.len()
        );

        (groups, summary)
    }
}

/// Check the root before any traversal.
fn validate_root(path: &Path) -> Result<(), FinderError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FinderError::PathNotFound(path.to_path_buf()),
        _ => FinderError::RootInaccessible {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(FinderError::NotADirectory(path.to_path_buf()));
    }

    std::fs::read_dir(path).map_err(|e| FinderError::RootInaccessible {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
