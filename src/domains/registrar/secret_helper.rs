//! Optional secret-manager integration.
//!
//! A secret helper is an executable living next to the server checkout at
//! `execution/scripts/credentials`. When present it answers
//!
//! ```text
//! credentials get <entry> --field <field>
//! credentials by-domain <domain> --field <field>
//! ```
//!
//! by printing the secret on stdout and exiting with status 0. A helper that
//! has not exited within [`HELPER_TIMEOUT`] is killed and counts as a miss.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::credentials::CredentialSource;

/// Location of the helper relative to a candidate root.
pub const HELPER_RELATIVE_PATH: &str = "execution/scripts/credentials";

/// Longest a single helper query may run.
pub const HELPER_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Secret source backed by the external helper executable.
#[derive(Debug, Clone)]
pub struct SecretHelper {
    path: PathBuf,
    timeout: Duration,
}

impl SecretHelper {
    /// Probe `candidates` in order and keep the first existing file.
    pub fn try_load(candidates: &[PathBuf]) -> Option<Self> {
        candidates
            .iter()
            .find(|path| path.is_file())
            .map(|path| Self {
                path: path.clone(),
                timeout: HELPER_TIMEOUT,
            })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Candidate helper locations relative to the running binary: its
    /// grand-parent directory first, then its parent.
    pub fn default_candidates() -> Vec<PathBuf> {
        let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        else {
            return Vec::new();
        };

        [exe_dir.parent().and_then(Path::parent), exe_dir.parent()]
            .into_iter()
            .flatten()
            .map(|root| root.join(HELPER_RELATIVE_PATH))
            .collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run(&self, args: &[&str]) -> Option<String> {
        let mut child = match Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!("Secret helper failed to start: {}", e);
                return None;
            }
        };

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    warn!("Secret helper timed out after {:?}; killing it", self.timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    debug!("Secret helper wait failed: {}", e);
                    let _ = child.kill();
                    return None;
                }
            }
        };

        if !status.success() {
            debug!("Secret helper exited with {}", status);
            return None;
        }

        let mut stdout = String::new();
        child.stdout.take()?.read_to_string(&mut stdout).ok()?;
        let secret = stdout.trim().to_string();
        (!secret.is_empty()).then_some(secret)
    }
}

impl CredentialSource for SecretHelper {
    fn name(&self) -> &str {
        "secret-helper"
    }

    fn by_name(&self, entry: &str, field: &str) -> Option<String> {
        self.run(&["get", entry, "--field", field])
    }

    fn by_domain(&self, domain: &str, field: &str) -> Option<String> {
        self.run(&["by-domain", domain, "--field", field])
    }
}
