//! Domain types for a sync run.
//!
//! Nothing here is persisted: remote and local state are re-read on every run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidFileName;

// ---------------------------------------------------------------------------
// FileName
// ---------------------------------------------------------------------------

/// A bare file name as produced by a remote directory listing.
///
/// Guaranteed non-empty, free of path separators and NUL, and never `.` or
/// `..`, so joining it onto the sync root always stays directly under the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileName(String);

impl FileName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidFileName> {
        let raw = raw.into();
        let bad = raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.contains(['/', '\0']);
        if bad {
            return Err(InvalidFileName(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FileName {
    type Error = InvalidFileName;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FileName {
    type Error = InvalidFileName;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<FileName> for String {
    fn from(name: FileName) -> Self {
        name.0
    }
}

// ---------------------------------------------------------------------------
// Per-file state
// ---------------------------------------------------------------------------

/// A file in the remote directory. The size is probed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFile {
    pub name: FileName,
    pub size: u64,
}

/// What the local sync root holds for a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LocalState {
    Absent,
    Present { size: u64 },
}

impl LocalState {
    pub fn size(&self) -> Option<u64> {
        match self {
            LocalState::Absent => None,
            LocalState::Present { size } => Some(*size),
        }
    }
}
