//! Human and JSON rendering of a [`SyncReport`].

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use tailsync_sync::{FileOutcome, FileReport, Summary, SyncReport};

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a SyncReport,
    summary: Summary,
    bytes_transferred: u64,
}

pub fn print_json(report: &SyncReport) -> Result<()> {
    let payload = JsonReport {
        report,
        summary: report.summary(),
        bytes_transferred: report.bytes_transferred(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize sync report")?
    );
    Ok(())
}

/// One line per file, printed as soon as that file is done so a run that
/// aborts still shows what it already changed.
pub fn print_file(file: &FileReport) {
    println!("  {}  {}", marker(&file.outcome), describe(file.path.display(), &file.outcome));
}

pub fn print_summary(report: &SyncReport) {
    println!("{}", summary_line(report));
}

fn summary_line(report: &SyncReport) -> String {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let source = format!("{}:{}", report.host, report.remote_dir);

    if report.files.is_empty() {
        return format!("{prefix}✓ '{source}' — no remote files");
    }
    if !report.files.iter().any(|f| f.outcome.is_change()) {
        return format!(
            "{prefix}✓ '{source}' already up to date ({} files)",
            report.files.len()
        );
    }

    let s = report.summary();
    format!(
        "{prefix}✓ '{source}' synced ({} fetched, {} appended, {} discarded, {} up to date)",
        s.fetched, s.appended, s.discarded, s.up_to_date
    )
}

fn marker(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Fetched { .. } | FileOutcome::WouldFetch { .. } => "+".green().bold().to_string(),
        FileOutcome::Appended { .. } | FileOutcome::WouldAppend { .. } => "»".cyan().bold().to_string(),
        FileOutcome::Discarded | FileOutcome::WouldDiscard => "✗".red().bold().to_string(),
        FileOutcome::UpToDate => "·".dimmed().to_string(),
    }
}

fn describe(path: impl std::fmt::Display, outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Fetched { bytes } => format!("{path} ({bytes} bytes)"),
        FileOutcome::WouldFetch { bytes } => format!("{path} (would fetch {bytes} bytes)"),
        FileOutcome::Appended { bytes } => format!("{path} (+{bytes} bytes)"),
        FileOutcome::WouldAppend { bytes } => format!("{path} (would append {bytes} bytes)"),
        FileOutcome::Discarded => format!("{path} (out of sync, removed; refetched next run)"),
        FileOutcome::WouldDiscard => format!("{path} (out of sync, would remove)"),
        FileOutcome::UpToDate => format!("{path}"),
    }
}
