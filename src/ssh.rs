//! SSH remote execution channel
//!
//! Runs status queries on the remote host through the OpenSSH client.
//! Password authentication goes through `sshpass -e` (the password is
//! passed in the `SSHPASS` environment variable, never on the command
//! line). A control-master connection is established once at startup and
//! multiplexes every subsequent query, so the session is program-scoped:
//! created once, torn down once on any exit path via `Drop`.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{DashError, Result};

/// Connection timeout handed to the OpenSSH client (seconds)
const CONNECT_TIMEOUT_SECS: u32 = 5;

/// A persistent SSH session to a single remote host.
pub struct SshSession {
    host: String,
    user: String,
    control_path: PathBuf,
    open: bool,
}

impl SshSession {
    /// Establishes the control-master connection.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Connection`] if the master process cannot be
    /// spawned or the remote host rejects the connection.
    pub fn connect(host: &str, user: &str, password: &str) -> Result<Self> {
        let control_path =
            std::env::temp_dir().join(format!("pidash-{}-{}.sock", host, std::process::id()));

        let output = Command::new("sshpass")
            .env("SSHPASS", password)
            .arg("-e")
            .arg("ssh")
            .args(["-o", "ControlMaster=yes"])
            .arg("-o")
            .arg(format!("ControlPath={}", control_path.display()))
            .args(["-o", "ControlPersist=yes"])
            .args(["-o", "StrictHostKeyChecking=no"])
            .arg("-o")
            .arg(format!("ConnectTimeout={CONNECT_TIMEOUT_SECS}"))
            .args(["-f", "-N"])
            .arg(format!("{user}@{host}"))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| DashError::Connection {
                host: host.to_string(),
                reason: format!("failed to spawn ssh: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DashError::Connection {
                host: host.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        Ok(Self {
            host: host.to_string(),
            user: user.to_string(),
            control_path,
            open: true,
        })
    }

    /// The host this session is connected to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Runs one command on the remote host and returns its stdout.
    ///
    /// `query` names the metric being fetched and is carried into the
    /// error so a failure identifies which query broke.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Connection`] if the multiplexed channel is
    /// gone, [`DashError::Query`] if the remote command fails or emits
    /// invalid UTF-8.
    pub fn exec(&self, query: &'static str, command: &str) -> Result<String> {
        let output = Command::new("ssh")
            .arg("-o")
            .arg(format!("ControlPath={}", self.control_path.display()))
            .args(["-o", "BatchMode=yes"])
            .arg(format!("{}@{}", self.user, self.host))
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| DashError::Connection {
                host: self.host.clone(),
                reason: format!("failed to spawn ssh: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DashError::Query {
                query,
                reason: format!("exit {}: {}", output.status, stderr.trim()),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| DashError::Query {
            query,
            reason: format!("invalid UTF-8 in output: {e}"),
        })
    }

    /// Closes the control-master connection. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        let _ = Command::new("ssh")
            .args(["-O", "exit"])
            .arg("-o")
            .arg(format!("ControlPath={}", self.control_path.display()))
            .arg(format!("{}@{}", self.user, self.host))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        self.close();
    }
}
