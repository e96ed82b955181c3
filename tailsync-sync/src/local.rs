//! Local side of a sync: one flat directory per remote host.
//!
//! New files are written to a hidden `.tailsync.<random>.tmp` sibling and
//! renamed into place, so an interrupted fetch never leaves a truncated file
//! that a later run would mistake for a prefix and append to. The temporary
//! name has a fixed length whatever the target name is, and `ls -1` never
//! lists dot-files, so it cannot collide with a remote name.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use tailsync_core::{FileName, LocalState};

use crate::error::{io_err, SyncError};

/// The local sync root for one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRoot {
    dir: PathBuf,
}

impl SyncRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `name` lives locally: directly under the root.
    pub fn path_of(&self, name: &FileName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    pub fn stat(&self, name: &FileName) -> Result<LocalState, SyncError> {
        let path = self.path_of(name);
        match fs::metadata(&path) {
            Ok(meta) => Ok(LocalState::Present { size: meta.len() }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LocalState::Absent),
            Err(e) => Err(io_err(path, e)),
        }
    }

    /// Create `name` with exactly `bytes`.
    pub fn write_new(&self, name: &FileName, bytes: &[u8]) -> Result<PathBuf, SyncError> {
        let path = self.path_of(name);
        write_new_in(&self.dir, &path, bytes)?;
        Ok(path)
    }

    /// Append `bytes` to the end of an existing `name`.
    pub fn append(&self, name: &FileName, bytes: &[u8]) -> Result<PathBuf, SyncError> {
        let path = self.path_of(name);
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_err(&path, e))?;
        file.write_all(bytes).map_err(|e| io_err(&path, e))?;
        file.flush().map_err(|e| io_err(&path, e))?;
        debug!("appended {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    pub fn remove(&self, name: &FileName) -> Result<PathBuf, SyncError> {
        let path = self.path_of(name);
        fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
        Ok(path)
    }

    /// Lowercase hex SHA-256 of the whole local file.
    pub fn digest(&self, name: &FileName) -> Result<String, SyncError> {
        let path = self.path_of(name);
        let mut file = File::open(&path).map_err(|e| io_err(&path, e))?;
        let mut hasher = Sha256::new();
        io::copy(&mut file, &mut hasher).map_err(|e| io_err(&path, e))?;
        Ok(hex::encode(hasher.finalize()))
    }
}

const TMP_PREFIX: &str = ".tailsync.";
const TMP_SUFFIX: &str = ".tmp";

/// Write `bytes` to a temporary file in `dir`, then rename it onto `path`.
/// The temporary file is deleted on every failure path.
fn write_new_in(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), SyncError> {
    let mut tmp = tempfile::Builder::new()
        .prefix(TMP_PREFIX)
        .suffix(TMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| io_err(dir, e))?;

    let tmp_path = tmp.path().to_path_buf();
    tmp.write_all(bytes).map_err(|e| io_err(&tmp_path, e))?;
    tmp.as_file().sync_all().map_err(|e| io_err(&tmp_path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o644))
            .map_err(|e| io_err(&tmp_path, e))?;
    }

    // A failed persist hands the file back; dropping it removes it.
    tmp.persist(path).map_err(|e| io_err(path, e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
