//! Error types for tailsync-remote.

use thiserror::Error;

use tailsync_core::InvalidFileName;

/// Everything that can go wrong talking to the remote host.
///
/// All variants are fatal for a run; callers do not try to tell a vanished
/// file from a permission problem or a broken channel.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// TCP dial failure.
    #[error("failed to dial {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Handshake, channel open or channel teardown failure.
    #[error("ssh session error: {0}")]
    Session(#[from] ssh2::Error),

    #[error("authentication as '{user}' failed: {reason}")]
    Auth { user: String, reason: String },

    /// Reading the command's output stream failed.
    #[error("unable to run command `{command}`: {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{command}` exited with status {status}: {stderr}")]
    ExitStatus {
        command: String,
        status: i32,
        stderr: String,
    },

    /// A listing entry that cannot live flat under the sync root.
    #[error("remote listing returned an unusable entry: {0}")]
    InvalidName(#[from] InvalidFileName),

    /// A listing entry that is not UTF-8. Commands are sent as UTF-8 text, so
    /// such a file cannot be named in one. `raw` is the entry with non-ASCII
    /// bytes escaped.
    #[error("remote listing entry \"{raw}\" is not valid UTF-8 and cannot be named in a command")]
    NonUtf8Name { raw: String },

    #[error("error occurred while trying to read remote file {name} size: {text:?} is not a byte count")]
    InvalidSize { name: String, text: String },

    #[error("unexpected digest output for remote file {name}: {text:?}")]
    InvalidDigest { name: String, text: String },
}
