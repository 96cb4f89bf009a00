//! Human-readable text output.
//!
//! Each group is printed as a blank line, a header naming its fingerprint,
//! and one `- path` line per member:
//!
//! ```text
//!
//! Duplicates (MD5: 5eb63bbbe01eeed093cb22bb8f5acdc3):
//! - /data/a.txt
//! - /data/b.txt
//! ```
//!
//! An empty result prints `No duplicates found`.

use std::io::{self, Write};

use yansi::Paint;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Message printed when a scan finds nothing.
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicates found";

/// Text output formatter.
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
    show_skipped: bool,
    show_summary: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self {
            groups,
            summary,
            show_skipped: false,
            show_summary: false,
        }
    }

    /// Append the list of skipped items.
    #[must_use]
    pub fn with_skipped(mut self, show: bool) -> Self {
        self.show_skipped = show;
        self
    }

    /// Append a one-line totals summary.
    #[must_use]
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.groups.is_empty() {
            writeln!(writer, "{NO_DUPLICATES_MESSAGE}")?;
        }

        for group in self.groups {
            writeln!(writer)?;
            let header = format!("Duplicates (MD5: {}):", group.fingerprint);
            writeln!(writer, "{}", header.bold())?;
            for file in &group.files {
                writeln!(writer, "- {}", file.path.display())?;
            }
        }

        if self.show_skipped && self.summary.has_skipped() {
            writeln!(writer)?;
            let header = format!("Skipped {} item(s):", self.summary.skipped.len());
            writeln!(writer, "{}", header.yellow())?;
            for err in &self.summary.skipped {
                writeln!(writer, "- {err}")?;
            }
        }

        if self.show_summary && !self.groups.is_empty() {
            writeln!(writer)?;
            writeln!(
                writer,
                "{} duplicate group(s), {} duplicate file(s), {} reclaimable",
                self.summary.duplicate_groups,
                self.summary.duplicate_files,
                self.summary.reclaimable_display()
            )?;
        }

        Ok(())
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
