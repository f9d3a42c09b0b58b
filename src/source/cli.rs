//! Adapter for the `but` command-line tool.
//!
//! Every call runs `<but> -C <workspace> --json <args...>` and captures its
//! output. No timeout is imposed here; a hung process hangs only the task
//! that awaits it.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::WorkspaceStatus;

use super::{SourceError, StatusSource};

/// Handle to the `but` CLI for one workspace directory.
#[derive(Debug, Clone)]
pub struct ButCli {
    binary: String,
    working_dir: PathBuf,
}

impl ButCli {
    pub fn new(working_dir: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Run the CLI in JSON mode and return its stdout.
    async fn execute(&self, args: &[&str]) -> Result<String, SourceError> {
        debug!("Running {} {:?} in {}", self.binary, args, self.working_dir.display());

        let output = Command::new(&self.binary)
            .arg("-C")
            .arg(&self.working_dir)
            .arg("--json")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SourceError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::Exit {
                binary: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl StatusSource for ButCli {
    async fn fetch_status(&self, include_files: bool) -> Result<WorkspaceStatus, SourceError> {
        let args: &[&str] = if include_files {
            &["status", "--files"]
        } else {
            &["status"]
        };

        let stdout = self.execute(args).await?;
        let status: WorkspaceStatus = serde_json::from_str(&stdout)?;
        debug!(
            "Fetched status: {} stacks, {} unassigned changes",
            status.stacks.len(),
            status.unassigned_changes.len()
        );
        Ok(status)
    }

    async fn is_available(&self) -> bool {
        match self.execute(&["status"]).await {
            Ok(_) => true,
            Err(e) if e.is_not_found() => {
                warn!("{} not found; install the GitButler CLI or set --but-path", self.binary);
                false
            }
            Err(e) => {
                debug!("Workspace not recognized by {}: {}", self.binary, e);
                false
            }
        }
    }

    async fn initialize_repository(&self) -> Result<(), SourceError> {
        self.execute(&["init"]).await.map(|_| ())
    }
}
