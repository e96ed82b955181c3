//! Error types for tailsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the run configuration, before any network
/// activity takes place.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting was empty.
    #[error("{0} has to be specified")]
    Missing(&'static str),

    #[error("port must be between 1 and 65535")]
    InvalidPort,

    /// The directory of the running executable could not be resolved.
    #[error("unable to get application path: {0}")]
    ExecutableDir(#[source] std::io::Error),

    /// The local sync root could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A remote listing entry that cannot be mapped to a flat local file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid file name {0:?}")]
pub struct InvalidFileName(pub String);
