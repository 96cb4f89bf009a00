//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding every regular file beneath it.
//!
//! # Features
//!
//! - Depth-first traversal, siblings sorted by file name for reproducible order
//! - Symbolic links are never followed and never yielded
//! - Special files (FIFOs, sockets, devices) are skipped
//! - Per-entry failures are yielded as [`ScanError`] values instead of
//!   stopping iteration
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileEntry, ScanError};
use crate::progress::ProgressCallback;

/// Directory walker for file discovery.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Optional progress callback
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
            progress_callback: None,
        }
    }

    /// Report each discovered file to `callback`.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. The root itself is never yielded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupefinder::scanner::Walker;
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."));
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut discovered = 0usize;

        WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| {
                let entry = match entry_result {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(self.handle_walkdir_error(e))),
                };

                let file_type = entry.file_type();
                if file_type.is_dir() {
                    return None;
                }
                if file_type.is_symlink() {
                    log::trace!("Skipping symlink: {}", entry.path().display());
                    return None;
                }
                if !file_type.is_file() {
                    log::trace!("Skipping special file: {}", entry.path().display());
                    return None;
                }

                let metadata = match entry.metadata() {
                    Ok(m) => m,
                    Err(e) => return Some(Err(self.handle_walkdir_error(e))),
                };

                let path = entry.into_path();
                discovered += 1;
                if let Some(ref callback) = self.progress_callback {
                    callback.on_progress(discovered, &path.to_string_lossy());
                }

                Some(Ok(FileEntry::new(path, metadata.len())))
            })
    }

    /// Convert a walkdir error into a [`ScanError`], logging it.
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let message = error.to_string();

        let scan_error = match error.into_io_error() {
            Some(io_error) => ScanError::from_io(path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message),
            },
        };

        if let ScanError::NotFound(p) = &scan_error {
            log::debug!("Path vanished during walk: {}", p.display());
        } else {
            log::warn!("{}", scan_error);
        }
        scan_error
    }
}
