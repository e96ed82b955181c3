//! Error types for tailsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use tailsync_remote::RemoteError;

/// All errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing, measuring or reading on the remote side failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A local stat / write / open / remove failed, with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
