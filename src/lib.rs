//! dupefinder - duplicate file finder
//!
//! Walks a directory tree, fingerprints every regular file with a chunked
//! MD5 digest, and reports groups of files whose contents are identical.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;

/// Run a scan as described by `cli` and write the report to stdout.
///
/// Returns the exit code matching the scan outcome.
///
/// # Errors
///
/// Fails if the root directory is unusable or the report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color || !std::io::stdout().is_terminal() {
        yansi::disable();
    }

    let hide_progress = cli.quiet || cli.no_progress || cli.output != OutputFormat::Text;
    let progress = Arc::new(Progress::new(hide_progress));

    let config = FinderConfig::default().with_progress_callback(progress);
    let finder = DuplicateFinder::new(config);

    let (groups, summary) = finder
        .find_duplicates(&cli.path)
        .with_context(|| format!("Failed to scan {}", cli.path.display()))?;

    let exit_code = ExitCode::for_scan(groups.len(), summary.skipped.len());
    log::debug!("Exit code {} ({})", exit_code.as_i32(), exit_code.code_prefix());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.output {
        OutputFormat::Text => TextOutput::new(&groups, &summary)
            .with_skipped(cli.show_skipped)
            .with_summary(!cli.quiet)
            .write_to(&mut out)
            .context("Failed to write text output")?,
        OutputFormat::Json => JsonOutput::new(&groups, &summary, exit_code)
            .write_to(&mut out, true)
            .context("Failed to write JSON output")?,
        OutputFormat::Csv => CsvOutput::new(&groups)
            .write_to(&mut out)
            .context("Failed to write CSV output")?,
    }

    out.flush().context("Failed to flush output")?;

    Ok(exit_code)
}
