//! Fingerprint grouping and duplicate group management.
//!
//! # Overview
//!
//! Every successfully fingerprinted file is appended to the group for its
//! fingerprint. Once all files are in, singleton groups are dropped; what
//! remains are confirmed duplicate groups of two or more files.
//!
//! Groups come back in the order their fingerprint was first seen, and files
//! inside a group keep the order they were supplied in.
//!
//! # Example
//!
//! ```
//! use dupefinder::duplicates::group_by_fingerprint;
//! use dupefinder::scanner::{FileEntry, Fingerprint};
//! use std::path::PathBuf;
//!
//! let same = Fingerprint::from_bytes([1; 16]);
//! let other = Fingerprint::from_bytes([2; 16]);
//! let files = vec![
//!     (same, FileEntry::new(PathBuf::from("/a.txt"), 11)),
//!     (other, FileEntry::new(PathBuf::from("/c.txt"), 9)),
//!     (same, FileEntry::new(PathBuf::from("/b.txt"), 11)),
//! ];
//!
//! let (groups, stats) = group_by_fingerprint(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.unique_fingerprints, 2);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].paths(), vec![PathBuf::from("/a.txt"), PathBuf::from("/b.txt")]);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{FileEntry, Fingerprint};

/// Confirmed duplicate group of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Content fingerprint shared by every file in the group
    pub fingerprint: Fingerprint,
    /// Files in discovery order
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, files: Vec<FileEntry>) -> Self {
        Self { fingerprint, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Size of one copy in bytes.
    ///
    /// Every member has identical content, so the first entry's size
    /// stands for all of them.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.files.first().map_or(0, |f| f.size)
    }

    /// Total wasted space (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size() * self.duplicate_count() as u64
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Fingerprint as hexadecimal string.
    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        self.fingerprint.to_hex()
    }

    /// Paths of the files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Statistics from the grouping step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of fingerprinted files
    pub total_files: usize,
    /// Number of distinct fingerprints
    pub unique_fingerprints: usize,
    /// Number of files that ended up in a duplicate group
    pub files_in_groups: usize,
    /// Number of groups with 2+ files
    pub duplicate_groups: usize,
}

/// Group fingerprinted files and drop singleton groups.
///
/// # Arguments
///
/// * `files` - Fingerprint and entry pairs in discovery order
///
/// # Returns
///
/// Duplicate groups (each with 2+ files) ordered by first sighting, plus
/// grouping statistics.
#[must_use]
pub fn group_by_fingerprint(
    files: Vec<(Fingerprint, FileEntry)>,
) -> (Vec<DuplicateGroup>, GroupingStats) {
    let mut stats = GroupingStats {
        total_files: files.len(),
        ..Default::default()
    };

    let mut index: HashMap<Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for (fingerprint, entry) in files {
        match index.get(&fingerprint) {
            Some(&i) => groups[i].files.push(entry),
            None => {
                index.insert(fingerprint, groups.len());
                groups.push(DuplicateGroup::new(fingerprint, vec![entry]));
            }
        }
    }

    stats.unique_fingerprints = groups.len();
    groups.retain(|g| g.len() > 1);
    stats.duplicate_groups = groups.len();
    stats.files_in_groups = groups.iter().map(DuplicateGroup::len).sum();

    log::debug!(
        "Grouped {} files into {} fingerprints, {} duplicate groups",
        stats.total_files,
        stats.unique_fingerprints,
        stats.duplicate_groups
    );

    (groups, stats)
}
