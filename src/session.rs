//! One active workspace connection.
//!
//! A session owns the status cache, the tree provider and the refresh
//! controller for a single workspace root. If the workspace is not recognized
//! when the session starts, it stays disabled and every action reports that.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::host::ViewHost;
use crate::refresh::{RefreshController, RefreshSettings, RefreshTrigger};
use crate::source::{SourceError, StatusSource};
use crate::tree::TreeProvider;
use crate::workspace::StatusCache;

/// Shown for any action attempted in an unrecognized workspace.
pub const NOT_A_REPOSITORY: &str =
    "This is not a GitButler repository. Run \"but init\" in the terminal to initialize.";

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{}", NOT_A_REPOSITORY)]
    Unavailable,

    #[error("Failed to refresh workspace status: {0}")]
    Fetch(#[from] SourceError),

    #[error("Failed to open file: {path}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// User-invocable actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    OpenFile(String),
    ShowBranch(String),
    ShowCommit(String),
}

struct Active<S> {
    cache: Arc<StatusCache>,
    provider: TreeProvider,
    controller: RefreshController<S>,
}

pub struct WorkspaceSession<S> {
    root: PathBuf,
    active: Option<Active<S>>,
}

impl<S: StatusSource> WorkspaceSession<S> {
    /// Probe the workspace and, if it is recognized, load the first snapshot.
    ///
    /// A failing first fetch leaves the session enabled with an empty tree.
    pub async fn init(root: impl Into<PathBuf>, source: S, settings: RefreshSettings) -> Self {
        let root = root.into();

        if !source.is_available().await {
            info!("{} is not a GitButler workspace, staying disabled", root.display());
            return Self { root, active: None };
        }

        let cache = Arc::new(StatusCache::new());
        let provider = TreeProvider::new(cache.clone());
        let controller = RefreshController::new(source, cache.clone(), settings);

        if let Err(e) = controller.refresh().await {
            warn!("Initial status fetch failed: {}", e);
        }
        info!("Workspace session started for {}", root.display());

        Self {
            root,
            active: Some(Active {
                cache,
                provider,
                controller,
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// The tree, or `None` for a disabled session.
    pub fn tree(&self) -> Option<&TreeProvider> {
        self.active.as_ref().map(|a| &a.provider)
    }

    /// Handle for file watchers and other change sources.
    pub fn trigger(&self) -> Option<RefreshTrigger> {
        self.active.as_ref().map(|a| a.controller.trigger())
    }

    fn active(&self) -> Result<&Active<S>, ActionError> {
        self.active.as_ref().ok_or(ActionError::Unavailable)
    }

    pub async fn refresh(&self) -> Result<(), ActionError> {
        self.active()?.controller.refresh().await?;
        Ok(())
    }

    /// Open a workspace file. Relative paths are taken from the workspace root.
    pub fn open_file(&self, file_path: &str, host: &dyn ViewHost) -> Result<(), ActionError> {
        self.active()?;
        let path = self.root.join(file_path);
        host.open_document(&path)
            .map_err(|source| ActionError::FileOpen {
                path: file_path.to_string(),
                source,
            })
    }

    pub fn show_branch(&self, branch_name: &str, host: &dyn ViewHost) -> Result<(), ActionError> {
        self.active()?;
        host.show_info(&format!("Branch: {}", branch_name));
        Ok(())
    }

    pub fn show_commit(&self, commit_id: &str, host: &dyn ViewHost) -> Result<(), ActionError> {
        self.active()?;
        host.show_info(&format!("Commit: {}", commit_id));
        Ok(())
    }

    /// Run an action and report any failure through `host`.
    ///
    /// An unrecognized workspace is informational; everything else is an error.
    pub async fn run_action(&self, action: Action, host: &dyn ViewHost) -> bool {
        let result = match &action {
            Action::Refresh => self.refresh().await,
            Action::OpenFile(path) => self.open_file(path, host),
            Action::ShowBranch(name) => self.show_branch(name, host),
            Action::ShowCommit(id) => self.show_commit(id, host),
        };

        match result {
            Ok(()) => true,
            Err(ActionError::Unavailable) => {
                host.show_info(NOT_A_REPOSITORY);
                false
            }
            Err(e) => {
                warn!("Action {:?} failed: {}", action, e);
                host.show_error(&e.to_string());
                false
            }
        }
    }

    /// Stop refreshing and drop the cached snapshot.
    pub fn dispose(self) {
        if let Some(active) = self.active {
            active.controller.dispose();
            active.cache.clear();
        }
        info!("Workspace session for {} disposed", self.root.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{file, status};
    use crate::domain::ChangeType;
    use crate::host::{HostMessage, RecordingHost, Severity};
    use crate::source::scripted::ScriptedSource;
    use tempfile::TempDir;

    fn info(text: &str) -> HostMessage {
        HostMessage {
            severity: Severity::Info,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_disabled_session_reports_every_action() {
        let source = ScriptedSource::unavailable();
        let session =
            WorkspaceSession::init("/tmp/nowhere", source.clone(), RefreshSettings::default())
                .await;
        assert!(!session.is_enabled());
        assert!(session.tree().is_none());
        assert_eq!(source.calls(), 0);

        let host = RecordingHost::new();
        let actions = [
            Action::Refresh,
            Action::OpenFile("a.rs".to_string()),
            Action::ShowBranch("main".to_string()),
            Action::ShowCommit("abc".to_string()),
        ];
        for action in actions {
            assert!(!session.run_action(action, &host).await);
        }

        let messages = host.take_messages();
        assert_eq!(messages.len(), 4);
        assert!(messages.iter().all(|m| *m == info(NOT_A_REPOSITORY)));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_init_loads_first_snapshot() {
        let source = ScriptedSource::new();
        source.push_ok(status(vec![file("a.rs", ChangeType::Added)], Vec::new(), 0));

        let session = WorkspaceSession::init("/repo", source.clone(), RefreshSettings::default())
            .await;
        assert!(session.is_enabled());
        assert_eq!(session.tree().unwrap().root_nodes().len(), 1);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_first_fetch_keeps_session_enabled() {
        let source = ScriptedSource::new();
        source.push_err("not ready");

        let session = WorkspaceSession::init("/repo", source.clone(), RefreshSettings::default())
            .await;
        assert!(session.is_enabled());
        assert!(session.tree().unwrap().root_nodes().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_refresh_failure_is_shown_as_error() {
        let source = ScriptedSource::new();
        source.push_ok(status(vec![file("a.rs", ChangeType::Added)], Vec::new(), 0));
        source.push_err("exploded");

        let session = WorkspaceSession::init("/repo", source.clone(), RefreshSettings::default())
            .await;
        let host = RecordingHost::new();
        assert!(!session.run_action(Action::Refresh, &host).await);

        let messages = host.take_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Error);
        assert!(messages[0].text.contains("exploded"));

        // Previous snapshot survives
        assert_eq!(session.tree().unwrap().root_nodes().len(), 1);
    }

    #[tokio::test]
    async fn test_show_actions_display_names() {
        let session =
            WorkspaceSession::init("/repo", ScriptedSource::new(), RefreshSettings::default())
                .await;
        let host = RecordingHost::new();

        assert!(
            session
                .run_action(Action::ShowBranch("feature/api".to_string()), &host)
                .await
        );
        assert!(
            session
                .run_action(Action::ShowCommit("deadbeef".to_string()), &host)
                .await
        );
        assert_eq!(
            host.take_messages(),
            vec![info("Branch: feature/api"), info("Commit: deadbeef")]
        );
    }

    #[tokio::test]
    async fn test_open_file_resolves_against_root() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("src")).unwrap();
        std::fs::write(temp_dir.path().join("src/lib.rs"), "").unwrap();

        let session =
            WorkspaceSession::init(temp_dir.path(), ScriptedSource::new(), RefreshSettings::default())
                .await;
        let host = RecordingHost::new();

        assert!(
            session
                .run_action(Action::OpenFile("src/lib.rs".to_string()), &host)
                .await
        );
        assert_eq!(
            host.take_opened(),
            vec![temp_dir.path().join("src/lib.rs").display().to_string()]
        );

        assert!(
            !session
                .run_action(Action::OpenFile("gone.rs".to_string()), &host)
                .await
        );
        let messages = host.take_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Error);
        assert_eq!(messages[0].text, "Failed to open file: gone.rs");
    }

    #[tokio::test]
    async fn test_dispose_clears_tree() {
        let source = ScriptedSource::new();
        source.push_ok(status(vec![file("a.rs", ChangeType::Added)], Vec::new(), 0));
        let session = WorkspaceSession::init("/repo", source, RefreshSettings::default()).await;

        let provider = session.tree().unwrap().clone();
        assert!(!provider.root_nodes().is_empty());

        session.dispose();
        assert!(provider.root_nodes().is_empty());
    }
}
