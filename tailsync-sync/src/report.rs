//! What a run did, per file and in total.

use std::path::PathBuf;

use serde::Serialize;

use tailsync_core::FileName;

/// Result of reconciling one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Created locally with `bytes` bytes.
    Fetched { bytes: u64 },
    /// `bytes` bytes appended to the local copy.
    Appended { bytes: u64 },
    /// Local copy deleted; the next run fetches it whole.
    Discarded,
    UpToDate,
    /// `--dry-run`: would have fetched `bytes` bytes.
    WouldFetch { bytes: u64 },
    /// `--dry-run`: would have appended `bytes` bytes.
    WouldAppend { bytes: u64 },
    /// `--dry-run`: would have deleted the local copy.
    WouldDiscard,
}

impl FileOutcome {
    /// Whether the local file was (or would have been) touched.
    pub fn is_change(&self) -> bool {
        !matches!(self, FileOutcome::UpToDate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: FileName,
    pub path: PathBuf,
    pub remote_size: u64,
    /// `None` when there was no local copy.
    pub local_size: Option<u64>,
    pub outcome: FileOutcome,
    /// Set only when the shared prefix was checked before an append.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub host: String,
    pub remote_dir: String,
    pub root: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

/// Per-action counters. Dry-run outcomes count toward the action they stand
/// for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub fetched: usize,
    pub appended: usize,
    pub discarded: usize,
    pub up_to_date: usize,
}

impl SyncReport {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for file in &self.files {
            match file.outcome {
                FileOutcome::Fetched { .. } | FileOutcome::WouldFetch { .. } => {
                    summary.fetched += 1
                }
                FileOutcome::Appended { .. } | FileOutcome::WouldAppend { .. } => {
                    summary.appended += 1
                }
                FileOutcome::Discarded | FileOutcome::WouldDiscard => summary.discarded += 1,
                FileOutcome::UpToDate => summary.up_to_date += 1,
            }
        }
        summary
    }

    /// Total bytes transferred (or that would have been).
    pub fn bytes_transferred(&self) -> u64 {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Fetched { bytes }
                | FileOutcome::Appended { bytes }
                | FileOutcome::WouldFetch { bytes }
                | FileOutcome::WouldAppend { bytes } => bytes,
                _ => 0,
            })
            .sum()
    }
}
