//! tailsync — one-way, size-driven sync of a remote directory over SSH.
//!
//! # Usage
//!
//! ```text
//! tailsync -h <host> -u <user> -d <remote-dir> [-p <port>]
//!          [--root <dir>] [--dry-run] [--verify-prefix] [--json]
//! ```
//!
//! Files land in `<root>/sync/<host>/`, where `<root>` defaults to the
//! directory holding this executable. Authentication goes through the local
//! SSH agent (`SSH_AUTH_SOCK`).

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use tailsync_core::{config::executable_dir, SyncConfig, SyncOptions, Target, DEFAULT_PORT};
use tailsync_remote::{ShellRemote, SshSession};
use tailsync_sync::SyncEngine;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "tailsync",
    version,
    about = "Mirror a remote directory over SSH, appending only what grew",
    long_about = None,
    disable_help_flag = true,
)]
struct Cli {
    /// Host of the system to be synced with.
    #[arg(short = 'h', long)]
    host: String,

    /// User to be used when connecting to host.
    #[arg(short = 'u', long)]
    user: String,

    /// Directory path on the remote host.
    #[arg(short = 'd', long = "dir", value_name = "REMOTE_DIR")]
    remote_dir: String,

    /// SSH port.
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Base directory for `sync/<host>/` (defaults to the executable's directory).
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Show what would change without touching local files.
    #[arg(long)]
    dry_run: bool,

    /// Check that the local copy matches the remote prefix before appending.
    #[arg(long)]
    verify_prefix: bool,

    /// Emit the run report as JSON.
    #[arg(long)]
    json: bool,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    /// Validate flags and create the local sync root. No network activity.
    fn config(&self) -> Result<SyncConfig> {
        let target = Target::new(&self.host, self.port, &self.user, &self.remote_dir)?;
        let base = match &self.root {
            Some(root) => root.clone(),
            None => executable_dir()?,
        };
        let options = SyncOptions {
            dry_run: self.dry_run,
            verify_prefix: self.verify_prefix,
        };
        Ok(SyncConfig::prepare(target, &base, options)?)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.config().context("invalid configuration")?;

    let session = SshSession::connect(&config.target)
        .with_context(|| format!("could not connect to {}", config.target.addr()))?;
    let remote = ShellRemote::new(session, config.target.remote_dir.as_str());

    let engine = SyncEngine::new(&config, remote);
    let report = if cli.json {
        engine.run()
    } else {
        engine.run_with(output::print_file)
    }
    .with_context(|| format!("sync failed for {}:{}", config.target.host, config.target.remote_dir))?;

    if cli.json {
        output::print_json(&report)
    } else {
        output::print_summary(&report);
        Ok(())
    }
}

/// Logs go to stderr; stdout carries the report.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
