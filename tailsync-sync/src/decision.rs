//! The per-file sync decision. Length is the only signal.

use std::cmp::Ordering;

use tailsync_core::LocalState;

/// What to do with one local file so that it matches its remote counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// No local copy: fetch the first `size` bytes into a new file.
    FetchWhole { size: u64 },
    /// Same length on both sides.
    UpToDate,
    /// Remote grew: append its last `delta` bytes. Assumes the remote only
    /// ever grows by appending, so the shared prefix is not re-read.
    AppendTail { delta: u64 },
    /// Local is longer than remote: the copy has diverged. Delete it so the
    /// next run fetches it whole.
    DiscardLocal,
}

/// Pick the action for a file given its local state and remote length.
pub fn decide(local: LocalState, remote_size: u64) -> SyncAction {
    match local {
        LocalState::Absent => SyncAction::FetchWhole { size: remote_size },
        LocalState::Present { size } => match size.cmp(&remote_size) {
            Ordering::Equal => SyncAction::UpToDate,
            Ordering::Less => SyncAction::AppendTail {
                delta: remote_size - size,
            },
            Ordering::Greater => SyncAction::DiscardLocal,
        },
    }
}
