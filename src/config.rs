//! Resolved runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::cli::{resolve_workspace_root, Cli};
use crate::refresh::{RefreshSettings, DEFAULT_QUIET_WINDOW};
use crate::source::ButCli;

/// Binary looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_BUT_BINARY: &str = "but";

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace_root: PathBuf,
    pub but_binary: String,
    pub include_files: bool,
    pub quiet_window: Duration,
    pub watch_worktree: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let workspace_root = resolve_workspace_root(cli.workspace_root.as_deref())?;

        Ok(Self {
            workspace_root,
            but_binary: cli
                .but_path
                .clone()
                .unwrap_or_else(|| DEFAULT_BUT_BINARY.to_string()),
            include_files: !cli.no_files,
            quiet_window: cli
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_QUIET_WINDOW),
            watch_worktree: cli.watch_worktree,
        })
    }

    pub fn refresh_settings(&self) -> RefreshSettings {
        RefreshSettings {
            include_files: self.include_files,
            quiet_window: self.quiet_window,
        }
    }

    pub fn source(&self) -> ButCli {
        ButCli::new(&self.workspace_root, &self.but_binary)
    }
}
