//! tailsync core library — domain types, run configuration, errors.
//!
//! Public API surface:
//! - [`types`] — file-name newtype and per-file state
//! - [`config`] — [`Target`], [`SyncConfig`] and sync-root preparation
//! - [`error`] — [`ConfigError`], [`InvalidFileName`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{SyncConfig, SyncOptions, Target, DEFAULT_PORT};
pub use error::{ConfigError, InvalidFileName};
pub use types::{FileName, LocalState, RemoteFile};
