//! # tailsync-remote
//!
//! Remote command execution over SSH and the file-access capability the sync
//! engine consumes.
//!
//! [`SshSession`] runs one shell command per channel. [`ShellRemote`] layers
//! list / size / read-range queries on top of any [`Execute`] implementation and
//! exposes them through the [`RemoteFiles`] trait, which is the only remote
//! surface the engine depends on.

pub mod error;
pub mod exec;
pub mod files;
pub mod shell;
pub mod ssh;

pub use error::RemoteError;
pub use exec::Execute;
pub use files::RemoteFiles;
pub use shell::ShellRemote;
pub use ssh::SshSession;
