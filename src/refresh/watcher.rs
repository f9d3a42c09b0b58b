//! File-system change notifications feeding the refresh controller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use super::controller::RefreshTrigger;

/// Keeps a file watcher alive; dropping it stops the notifications.
pub struct ChangeWatcher {
    _watcher: RecommendedWatcher,
}

impl ChangeWatcher {
    /// Watch `paths` recursively and poke `trigger` on every relevant event.
    ///
    /// Paths that do not exist are skipped.
    pub fn start(paths: &[PathBuf], trigger: RefreshTrigger) -> Result<Self> {
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if should_process_event(&event) => trigger.notify(),
                Ok(_) => {}
                Err(e) => debug!("File watcher error: {}", e),
            },
            notify::Config::default(),
        )
        .context("Failed to create file watcher")?;

        let mut watched = Vec::with_capacity(paths.len());
        for path in paths {
            if !path.exists() {
                warn!("Not watching {}: path does not exist", path.display());
                continue;
            }
            watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch path: {}", path.display()))?;
            watched.push(path);
        }
        debug!("Watching {:?} for changes", watched);

        Ok(Self { _watcher: watcher })
    }
}

/// Directories to watch for a workspace rooted at `root`.
///
/// Only the repository metadata by default; the whole worktree (which
/// contains the metadata) when `include_worktree` is set.
pub fn watch_paths(root: &Path, include_worktree: bool) -> Vec<PathBuf> {
    if include_worktree {
        vec![root.to_path_buf()]
    } else {
        vec![root.join(".git")]
    }
}

/// Creates, modifications and removals count; reads and lock files do not.
fn should_process_event(event: &Event) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind && !event.paths.iter().all(|p| is_lock_file(p))
}

fn is_lock_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "lock")
}
