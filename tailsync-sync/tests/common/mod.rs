//! Shared fixtures for engine tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;

use sha2::{Digest, Sha256};
use tailsync_core::{FileName, SyncConfig, SyncOptions, Target};
use tailsync_remote::{RemoteError, RemoteFiles};

/// In-memory remote directory that records every call made against it.
#[derive(Default)]
pub struct FakeRemote {
    files: Vec<(String, Vec<u8>)>,
    bad_size: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, content: &[u8]) -> Self {
        self.set(name, content);
        self
    }

    /// `wc` for this name prints nothing, as when the file vanished.
    pub fn with_bad_size(mut self, name: &str) -> Self {
        self.files.push((name.to_string(), Vec::new()));
        self.bad_size.push(name.to_string());
        self
    }

    pub fn set(&mut self, name: &str, content: &[u8]) {
        match self.files.iter_mut().find(|(n, _)| n == name) {
            Some((_, c)) => *c = content.to_vec(),
            None => self.files.push((name.to_string(), content.to_vec())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("head") || c.starts_with("tail"))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn content(&self, name: &FileName) -> &[u8] {
        self.files
            .iter()
            .find(|(n, _)| n == name.as_str())
            .map(|(_, c)| c.as_slice())
            .expect("file exists in fake remote")
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl RemoteFiles for FakeRemote {
    fn list(&self) -> Result<Vec<FileName>, RemoteError> {
        self.record("list".to_string());
        Ok(self
            .files
            .iter()
            .map(|(n, _)| FileName::parse(n.as_str()).expect("valid name"))
            .collect())
    }

    fn size(&self, name: &FileName) -> Result<u64, RemoteError> {
        self.record(format!("size {name}"));
        if self.bad_size.iter().any(|n| n == name.as_str()) {
            return Err(RemoteError::InvalidSize {
                name: name.to_string(),
                text: String::new(),
            });
        }
        Ok(self.content(name).len() as u64)
    }

    fn read_head(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        self.record(format!("head {len} {name}"));
        let content = self.content(name);
        Ok(content[..len as usize].to_vec())
    }

    fn read_tail(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        self.record(format!("tail {len} {name}"));
        let content = self.content(name);
        Ok(content[content.len() - len as usize..].to_vec())
    }

    fn prefix_digest(&self, name: &FileName, len: u64) -> Result<String, RemoteError> {
        self.record(format!("digest {len} {name}"));
        Ok(sha256_hex(&self.content(name)[..len as usize]))
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn config(root: &Path, options: SyncOptions) -> SyncConfig {
    SyncConfig {
        target: Target::new("fixture-host", 22, "tester", "/var/log/app").expect("target"),
        root: root.to_path_buf(),
        options,
    }
}

pub fn name(s: &str) -> FileName {
    FileName::parse(s).expect("valid name")
}
