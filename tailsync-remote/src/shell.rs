//! [`RemoteFiles`] over plain shell utilities (`ls`, `wc`, `head`, `tail`,
//! `sha256sum`).
//!
//! The remote directory is interpolated verbatim so the remote shell can still
//! expand things like `~/logs`; file names are single-quoted.

use tracing::{debug, warn};

use tailsync_core::FileName;

use crate::error::RemoteError;
use crate::exec::Execute;
use crate::files::RemoteFiles;

/// Shell-command implementation of [`RemoteFiles`] for one remote directory.
pub struct ShellRemote<E> {
    exec: E,
    dir: String,
}

impl<E: Execute> ShellRemote<E> {
    pub fn new(exec: E, dir: impl Into<String>) -> Self {
        Self {
            exec,
            dir: dir.into(),
        }
    }

    pub fn executor(&self) -> &E {
        &self.exec
    }

    fn path(&self, name: &FileName) -> String {
        remote_path(&self.dir, name)
    }

    fn read(&self, command: String, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        let bytes = self.exec.execute(&command)?;
        if bytes.len() as u64 != len {
            warn!(
                file = %name,
                requested = len,
                received = bytes.len(),
                "remote file changed while reading"
            );
        }
        Ok(bytes)
    }
}

impl<E: Execute> RemoteFiles for ShellRemote<E> {
    fn list(&self) -> Result<Vec<FileName>, RemoteError> {
        let out = self.exec.execute(&list_command(&self.dir))?;
        let names = parse_listing(&out)?;
        debug!(dir = %self.dir, count = names.len(), "listed remote directory");
        Ok(names)
    }

    fn size(&self, name: &FileName) -> Result<u64, RemoteError> {
        let out = self.exec.execute(&size_command(&self.path(name)))?;
        parse_size(name, &out)
    }

    fn read_head(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        self.read(head_command(&self.path(name), len), name, len)
    }

    fn read_tail(&self, name: &FileName, len: u64) -> Result<Vec<u8>, RemoteError> {
        self.read(tail_command(&self.path(name), len), name, len)
    }

    fn prefix_digest(&self, name: &FileName, len: u64) -> Result<String, RemoteError> {
        let out = self.exec.execute(&digest_command(&self.path(name), len))?;
        parse_digest(name, &out)
    }
}

// ---------------------------------------------------------------------------
// Command text
// ---------------------------------------------------------------------------

/// Single-quote `s` for a POSIX shell.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

pub fn remote_path(dir: &str, name: &FileName) -> String {
    format!("{dir}/{}", quote(name.as_str()))
}

pub fn list_command(dir: &str) -> String {
    format!("ls -1 {dir}")
}

pub fn size_command(path: &str) -> String {
    format!("wc -c {path} | awk '{{ print $1 }}'")
}

pub fn head_command(path: &str, len: u64) -> String {
    format!("head -c {len} {path}")
}

pub fn tail_command(path: &str, len: u64) -> String {
    format!("tail -c {len} {path}")
}

pub fn digest_command(path: &str, len: u64) -> String {
    format!("head -c {len} {path} | sha256sum | awk '{{ print $1 }}'")
}

// ---------------------------------------------------------------------------
// Output parsing
// ---------------------------------------------------------------------------

/// Split `ls -1` output into names, discarding empty lines. Names are kept
/// byte for byte, so an entry that is not UTF-8 is an error rather than a
/// lossy rewrite that would name a different file.
pub fn parse_listing(out: &[u8]) -> Result<Vec<FileName>, RemoteError> {
    out.split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| -> Result<FileName, RemoteError> {
            let line = std::str::from_utf8(line).map_err(|_| RemoteError::NonUtf8Name {
                raw: line.escape_ascii().to_string(),
            })?;
            Ok(FileName::parse(line)?)
        })
        .collect()
}

/// Parse the trimmed decimal byte count printed by [`size_command`].
pub fn parse_size(name: &FileName, out: &[u8]) -> Result<u64, RemoteError> {
    let text = String::from_utf8_lossy(out);
    text.trim()
        .parse::<u64>()
        .map_err(|_| RemoteError::InvalidSize {
            name: name.to_string(),
            text: text.trim().to_string(),
        })
}

/// Parse the trimmed hex digest printed by [`digest_command`].
pub fn parse_digest(name: &FileName, out: &[u8]) -> Result<String, RemoteError> {
    let text = String::from_utf8_lossy(out);
    let digest = text.trim();
    if digest.len() == 64 && digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(digest.to_ascii_lowercase())
    } else {
        Err(RemoteError::InvalidDigest {
            name: name.to_string(),
            text: digest.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
