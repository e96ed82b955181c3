//! Remote command execution seam.

use crate::error::RemoteError;

/// Runs a command string verbatim through a remote shell and returns what it
/// wrote to standard output.
///
/// A non-zero exit status is an error. Implementations release whatever
/// per-command resources they open before returning, on success and failure.
pub trait Execute {
    fn execute(&self, command: &str) -> Result<Vec<u8>, RemoteError>;
}

impl<T: Execute + ?Sized> Execute for &T {
    fn execute(&self, command: &str) -> Result<Vec<u8>, RemoteError> {
        (**self).execute(command)
    }
}
