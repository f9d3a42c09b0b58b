//! Status sources.
//!
//! A [`StatusSource`] produces workspace status snapshots on demand. The only
//! production implementation shells out to the `but` CLI; tests substitute
//! scripted sources.

mod cli;
mod error;
#[cfg(test)]
pub(crate) mod scripted;

pub use cli::ButCli;
pub use error::SourceError;

use std::future::Future;

use crate::domain::WorkspaceStatus;

/// Something that can report the current workspace status.
pub trait StatusSource: Send + Sync + 'static {
    /// Fetch a fresh snapshot, optionally with per-commit file detail.
    fn fetch_status(
        &self,
        include_files: bool,
    ) -> impl Future<Output = Result<WorkspaceStatus, SourceError>> + Send;

    /// Probe whether the workspace is recognized. Never fails.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// One-shot repository setup.
    fn initialize_repository(&self) -> impl Future<Output = Result<(), SourceError>> + Send;
}
