//! CSV output formatter for duplicate scan results.
//!
//! One row is generated for each file in each duplicate group.
//!
//! # Columns
//!
//! - `group_id`: 1-based ID of the duplicate group
//! - `fingerprint`: MD5 fingerprint (hexadecimal)
//! - `path`: Path to the file as walked
//! - `size`: File size in bytes
//! - `modified`: Last modified time (RFC 3339), or `unknown`

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateGroup;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow {
    group_id: usize,
    fingerprint: String,
    path: String,
    size: u64,
    modified: String,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.groups.is_empty() {
            csv_writer.write_record(["group_id", "fingerprint", "path", "size", "modified"])?;
        }

        for (idx, group) in self.groups.iter().enumerate() {
            let fingerprint = group.fingerprint_hex();

            for file in &group.files {
                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    fingerprint: fingerprint.clone(),
                    path: file.path.to_string_lossy().into_owned(),
                    size: file.size,
                    modified: modified_time(&file.path),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

fn modified_time(path: &std::path::Path) -> String {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|m| DateTime::<Utc>::from(m).to_rfc3339())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{FileEntry, Fingerprint};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_csv_output_basic() {
        let dir = TempDir::new().unwrap();
        let file1 = dir.path().join("file1.txt");
        let file2 = dir.path().join("file2.txt");
        fs::write(&file1, b"content").unwrap();
        fs::write(&file2, b"content").unwrap();

        let groups = vec![DuplicateGroup::new(
            Fingerprint::from_bytes([0u8; 16]),
            vec![FileEntry::new(file1, 7), FileEntry::new(file2, 7)],
        )];

        let csv_str = CsvOutput::new(&groups).to_string().unwrap();
        let lines: Vec<_> = csv_str.lines().collect();

        assert_eq!(lines[0], "group_id,fingerprint,path,size,modified");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,00000000000000000000000000000000,"));
        assert!(lines[1].contains("file1.txt"));
        assert!(lines[2].contains("file2.txt"));
        assert!(lines[1].contains(",7,"));
        assert!(!lines[1].ends_with("unknown"));
    }

    #[test]
    fn test_csv_output_quoting() {
        let dir = TempDir::new().unwrap();
        let file_with_comma = dir.path().join("file,with,comma.txt");
        fs::write(&file_with_comma, b"content").unwrap();

        let groups = vec![DuplicateGroup::new(
            Fingerprint::from_bytes([0u8; 16]),
            vec![FileEntry::new(file_with_comma, 7)],
        )];

        let csv_str = CsvOutput::new(&groups).to_string().unwrap();
        assert!(csv_str.contains('"'));
        assert!(csv_str.contains("file,with,comma.txt"));
    }

    #[test]
    fn test_csv_missing_file_has_unknown_time() {
        let groups = vec![DuplicateGroup::new(
            Fingerprint::from_bytes([2u8; 16]),
            vec![
                FileEntry::new(PathBuf::from("/no/such/a"), 1),
                FileEntry::new(PathBuf::from("/no/such/b"), 1),
            ],
        )];

        let csv_str = CsvOutput::new(&groups).to_string().unwrap();
        assert!(csv_str.lines().skip(1).all(|l| l.ends_with(",unknown")));
    }

    #[test]
    fn test_csv_empty_has_header_only() {
        let csv_str = CsvOutput::new(&[]).to_string().unwrap();
        assert_eq!(csv_str, "group_id,fingerprint,path,size,modified\n");
    }
}
