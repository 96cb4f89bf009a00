//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping fingerprinted files and dropping singletons
//! - Orchestrating the walk/fingerprint/group scan

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{group_by_fingerprint, DuplicateGroup, GroupingStats};
