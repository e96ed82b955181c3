//! # tailsync-sync
//!
//! Size-driven one-way sync of a remote directory into a flat local root.
//!
//! [`decide`] maps the local state and the remote size of one file to a
//! [`SyncAction`]; [`SyncEngine`] walks the remote listing, applies those
//! actions through [`SyncRoot`] and returns a [`SyncReport`]. The first error
//! aborts the run and is handed back to the caller.

pub mod decision;
pub mod engine;
pub mod error;
pub mod local;
pub mod report;

pub use decision::{decide, SyncAction};
pub use engine::SyncEngine;
pub use error::SyncError;
pub use local::SyncRoot;
pub use report::{FileOutcome, FileReport, Summary, SyncReport};
