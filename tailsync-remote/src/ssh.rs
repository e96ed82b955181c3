//! Agent-authenticated SSH session.

use std::io::{self, Read};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use ssh2::Session;
use tracing::{debug, info};

use tailsync_core::Target;

use crate::error::RemoteError;
use crate::exec::Execute;

/// Environment variable naming the local SSH agent socket.
pub const AUTH_SOCK_ENV: &str = "SSH_AUTH_SOCK";

/// One authenticated connection to a remote host, used for a whole run.
///
/// Every [`Execute::execute`] call opens its own channel and drops it before
/// returning.
pub struct SshSession {
    session: Session,
}

impl SshSession {
    /// Dial `target`, perform the SSH handshake and authenticate through the
    /// local agent.
    pub fn connect(target: &Target) -> Result<Self, RemoteError> {
        let addr = target.addr();
        let tcp = TcpStream::connect((target.host.as_str(), target.port)).map_err(|source| {
            RemoteError::Connect {
                addr: addr.clone(),
                source,
            }
        })?;

        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        authenticate_with_agent(&session, &target.user)?;

        info!(addr = %addr, user = %target.user, "connected");
        Ok(Self { session })
    }
}

/// Offer the agent's identities. Without an agent there is no method to offer.
fn authenticate_with_agent(session: &Session, user: &str) -> Result<(), RemoteError> {
    let auth_err = |reason: String| RemoteError::Auth {
        user: user.to_string(),
        reason,
    };

    if std::env::var_os(AUTH_SOCK_ENV).is_none() {
        return Err(auth_err(format!(
            "{AUTH_SOCK_ENV} is not set; no authentication method available"
        )));
    }

    session
        .userauth_agent(user)
        .map_err(|e| auth_err(e.to_string()))?;

    if !session.authenticated() {
        return Err(auth_err("agent offered no accepted identity".to_string()));
    }
    Ok(())
}

impl Execute for SshSession {
    fn execute(&self, command: &str) -> Result<Vec<u8>, RemoteError> {
        debug!(command, "exec");
        let exec_err = |source: std::io::Error| RemoteError::Exec {
            command: command.to_string(),
            source,
        };

        let mut channel = self.session.channel_session()?;
        channel.exec(command)?;

        // Both streams share one flow-control window, so they are drained
        // together: a command that fills stderr must not stall stdout.
        self.session.set_blocking(false);
        let drained = drain(&mut channel.stream(0), &mut channel.stderr());
        self.session.set_blocking(true);
        let (stdout, stderr) = drained.map_err(exec_err)?;

        channel.wait_close()?;
        let status = channel.exit_status()?;
        if status != 0 {
            return Err(RemoteError::ExitStatus {
                command: command.to_string(),
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        debug!(command, bytes = stdout.len(), "exec done");
        Ok(stdout)
    }
}

const DRAIN_BUF: usize = 32 * 1024;
const DRAIN_IDLE: Duration = Duration::from_millis(2);

/// Read two non-blocking streams to EOF, alternating between them so neither
/// can stall the other. `WouldBlock` means "nothing yet"; `Ok(0)` means EOF.
fn drain(out: &mut impl Read, err: &mut impl Read) -> io::Result<(Vec<u8>, Vec<u8>)> {
    let mut buf = vec![0u8; DRAIN_BUF];
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let (mut out_open, mut err_open) = (true, true);

    while out_open || err_open {
        let mut progressed = false;
        if out_open {
            out_open = read_some(out, &mut buf, &mut stdout, &mut progressed)?;
        }
        if err_open {
            err_open = read_some(err, &mut buf, &mut stderr, &mut progressed)?;
        }
        if !progressed {
            thread::sleep(DRAIN_IDLE);
        }
    }
    Ok((stdout, stderr))
}

/// One read attempt. Returns whether the stream is still open.
fn read_some(
    stream: &mut impl Read,
    buf: &mut [u8],
    sink: &mut Vec<u8>,
    progressed: &mut bool,
) -> io::Result<bool> {
    match stream.read(buf) {
        Ok(0) => {
            *progressed = true;
            Ok(false)
        }
        Ok(n) => {
            sink.extend_from_slice(&buf[..n]);
            *progressed = true;
            Ok(true)
        }
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
            Ok(true)
        }
        Err(e) => Err(e),
    }
}
