//! Command-line interface definitions for dupefinder.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and print groups as text
//! dupefinder ~/Downloads
//!
//! # JSON output for scripting, including the skipped-items list
//! dupefinder ~/Downloads --output json
//!
//! # Show which files could not be read
//! dupefinder ~/Downloads --show-skipped
//!
//! # Verbose mode for debugging
//! dupefinder -vv ~/Downloads
//! ```

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find duplicate files by content fingerprint.
///
/// Walks PATH recursively, fingerprints every regular file with MD5, and
/// prints each group of files whose contents are identical.
#[derive(Debug, Parser)]
#[command(name = "dupefinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value = "text",
        env = "DUPEFINDER_OUTPUT"
    )]
    pub output: OutputFormat,

    /// List files and directories that could not be read (text output)
    #[arg(long, env = "DUPEFINDER_SHOW_SKIPPED", value_parser = FalseyValueParser::new())]
    pub show_skipped: bool,

    /// Do not draw a progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report itself
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (any non-empty `NO_COLOR` value except "0"/"false")
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable groups
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
