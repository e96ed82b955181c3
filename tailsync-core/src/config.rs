//! Run configuration, built once at startup and passed by reference.
//!
//! Local layout: `<base>/sync/<host>/`, where `<base>` defaults to the
//! directory holding the running executable.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 22;
pub const SYNC_DIR: &str = "sync";

/// The remote end of a run: where to connect and which directory to mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub remote_dir: String,
}

impl Target {
    /// Validate and build a target. Empty strings count as missing.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        remote_dir: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let host = host.into();
        let user = user.into();
        let remote_dir = remote_dir.into();

        if host.trim().is_empty() {
            return Err(ConfigError::Missing("host"));
        }
        if remote_dir.trim().is_empty() {
            return Err(ConfigError::Missing("remote directory"));
        }
        if user.trim().is_empty() {
            return Err(ConfigError::Missing("user"));
        }
        if port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        Ok(Self {
            host,
            port,
            user,
            remote_dir,
        })
    }

    /// `host:port`, suitable for a TCP connect.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Behavior switches that do not change where data comes from or goes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncOptions {
    /// Decide and report, but never touch local files or read remote content.
    pub dry_run: bool,
    /// Compare digests of the shared prefix before appending a tail.
    pub verify_prefix: bool,
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
    pub target: Target,
    /// Local directory that receives the mirrored files, flat.
    pub root: PathBuf,
    pub options: SyncOptions,
}

impl SyncConfig {
    /// Resolve the sync root under `base` and create it if absent.
    pub fn prepare(
        target: Target,
        base: &Path,
        options: SyncOptions,
    ) -> Result<Self, ConfigError> {
        let root = sync_root(base, &target.host);
        create_root(&root)?;
        Ok(Self {
            target,
            root,
            options,
        })
    }
}

/// `<base>/sync/<host>`.
pub fn sync_root(base: &Path, host: &str) -> PathBuf {
    base.join(SYNC_DIR).join(host)
}

/// Directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutableDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ConfigError::ExecutableDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

fn create_root(root: &Path) -> Result<(), ConfigError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(root).map_err(|source| ConfigError::CreateRoot {
        path: root.to_path_buf(),
        source,
    })
}
