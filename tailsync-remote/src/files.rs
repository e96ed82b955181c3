//! The remote file-access capability consumed by the sync engine.

use tailsync_core::FileName;

use crate::error::RemoteError;

/// Read-only access to the files of one remote directory.
///
/// The engine only ever talks to the remote side through this trait, so the
/// shell-command implementation in [`crate::shell`] can be swapped for a
/// structured transfer protocol without touching the sync decisions.
pub trait RemoteFiles {
    /// Names in the directory, in listing order. Blank entries are dropped.
    fn list(&self) -> Result<Vec<FileName>, RemoteError>;

    /// Current byte length of `name`.
    fn size(&self, name: &FileName) -> Result<u64, RemoteError>;

    /// The first `len` bytes of `name`.
    fn read_head(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError>;

    /// The last `len` bytes of `name`.
    fn read_tail(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError>;

    /// Lowercase hex SHA-256 of the first `len` bytes of `name`.
    fn prefix_digest(&self, name: &FileName, len: u64) -> Result<String, RemoteError>;
}

impl<T: RemoteFiles + ?Sized> RemoteFiles for &T {
    fn list(&self) -> Result<Vec<FileName>, RemoteError> {
        (**self).list()
    }

    fn size(&self, name: &FileName) -> Result<u64, RemoteError> {
        (**self).size(name)
    }

    fn read_head(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        (**self).read_head(name, len)
    }

    fn read_tail(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        (**self).read_tail(name, len)
    }

    fn prefix_digest(&self, name: &FileName, len: u64) -> Result<String, RemoteError> {
        (**self).prefix_digest(name, len)
    }
}
