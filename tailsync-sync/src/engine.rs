//! The sync loop: list once, then reconcile each file in listing order.
//!
//! Files are handled one at a time and fully before the next. Any error stops
//! the run right there; files already handled keep their new state.

use tracing::{debug, info, warn};

use tailsync_core::{FileName, RemoteFile, SyncConfig};
use tailsync_remote::RemoteFiles;

use crate::decision::{decide, SyncAction};
use crate::error::SyncError;
use crate::local::SyncRoot;
use crate::report::{FileOutcome, FileReport, SyncReport};

/// Runs one sync pass of `config.target.remote_dir` into `config.root`.
pub struct SyncEngine<'a, R> {
    config: &'a SyncConfig,
    remote: R,
    root: SyncRoot,
}

impl<'a, R: RemoteFiles> SyncEngine<'a, R> {
    pub fn new(config: &'a SyncConfig, remote: R) -> Self {
        Self {
            config,
            remote,
            root: SyncRoot::new(&config.root),
        }
    }

    pub fn root(&self) -> &SyncRoot {
        &self.root
    }

    /// Reconcile every listed remote file.
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), but hands each file's report to `on_file` as
    /// soon as that file is done. If the run aborts, `on_file` has already
    /// seen every file that was changed before the error.
    pub fn run_with<F>(&self, mut on_file: F) -> Result<SyncReport, SyncError>
    where
        F: FnMut(&FileReport),
    {
        let names = self.remote.list()?;
        info!(
            host = %self.config.target.host,
            dir = %self.config.target.remote_dir,
            files = names.len(),
            dry_run = self.config.options.dry_run,
            "sync started"
        );

        let mut files = Vec::with_capacity(names.len());
        for name in &names {
            debug!(file = %name, "start to process file");
            let file = self.sync_file(name)?;
            on_file(&file);
            files.push(file);
        }

        Ok(SyncReport {
            host: self.config.target.host.clone(),
            remote_dir: self.config.target.remote_dir.clone(),
            root: self.root.dir().to_path_buf(),
            dry_run: self.config.options.dry_run,
            files,
        })
    }

    /// Reconcile a single file with its remote counterpart.
    pub fn sync_file(&self, name: &FileName) -> Result<FileReport, SyncError> {
        let remote = RemoteFile {
            name: name.clone(),
            size: self.remote.size(name)?,
        };
        let local = self.root.stat(name)?;
        let mut action = decide(local, remote.size);

        let mut prefix_verified = None;
        if let (SyncAction::AppendTail { .. }, Some(local_size)) = (action, local.size()) {
            if self.config.options.verify_prefix {
                let matches = self.prefix_matches(name, local_size)?;
                prefix_verified = Some(matches);
                if !matches {
                    warn!(file = %name, "local copy does not match remote prefix");
                    action = SyncAction::DiscardLocal;
                }
            }
        }

        let outcome = if self.config.options.dry_run {
            planned(action)
        } else {
            self.apply(name, action)?
        };

        Ok(FileReport {
            path: self.root.path_of(name),
            name: remote.name,
            remote_size: remote.size,
            local_size: local.size(),
            outcome,
            prefix_verified,
        })
    }

    fn prefix_matches(&self, name: &FileName, local_size: u64) -> Result<bool, SyncError> {
        let local = self.root.digest(name)?;
        let remote = self.remote.prefix_digest(name, local_size)?;
        Ok(local == remote)
    }

    fn apply(&self, name: &FileName, action: SyncAction) -> Result<FileOutcome, SyncError> {
        match action {
            SyncAction::FetchWhole { size } => {
                let bytes = if size == 0 {
                    Vec::new()
                } else {
                    self.remote.read_head(name, size)?
                };
                let path = self.root.write_new(name, &bytes)?;
                info!("created new file {}", path.display());
                Ok(FileOutcome::Fetched {
                    bytes: bytes.len() as u64,
                })
            }
            SyncAction::UpToDate => {
                debug!(file = %name, "already up to date");
                Ok(FileOutcome::UpToDate)
            }
            SyncAction::AppendTail { delta } => {
                let bytes = self.remote.read_tail(name, delta)?;
                let path = self.root.append(name, &bytes)?;
                info!("synced {} and wrote {} bytes", path.display(), bytes.len());
                Ok(FileOutcome::Appended {
                    bytes: bytes.len() as u64,
                })
            }
            SyncAction::DiscardLocal => {
                let path = self.root.remove(name)?;
                info!(
                    "{name} was out of sync, removed {}; it will be fetched again at next sync",
                    path.display()
                );
                Ok(FileOutcome::Discarded)
            }
        }
    }
}

fn planned(action: SyncAction) -> FileOutcome {
    match action {
        SyncAction::FetchWhole { size } => FileOutcome::WouldFetch { bytes: size },
        SyncAction::UpToDate => FileOutcome::UpToDate,
        SyncAction::AppendTail { delta } => FileOutcome::WouldAppend { bytes: delta },
        SyncAction::DiscardLocal => FileOutcome::WouldDiscard,
    }
}
