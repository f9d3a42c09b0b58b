//! Status cache for the active workspace.
//!
//! Holds the most recently fetched [`WorkspaceStatus`]. A new snapshot
//! replaces the old one wholesale; there is no merging. Listeners are woken
//! on every replace or clear, which is what drives "tree changed" in the
//! view hosts.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::WorkspaceStatus;

/// Snapshot slot shared by the refresh controller and the tree provider.
#[derive(Debug)]
pub struct StatusCache {
    slot: watch::Sender<Option<Arc<WorkspaceStatus>>>,
}

impl StatusCache {
    /// Create an empty cache
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    /// Swap in a new snapshot and notify listeners.
    pub fn replace(&self, status: WorkspaceStatus) {
        debug!(
            "Status cache replaced ({} stacks, {} unassigned changes)",
            status.stacks.len(),
            status.unassigned_changes.len()
        );
        self.slot.send_replace(Some(Arc::new(status)));
    }

    /// Drop the current snapshot and notify listeners.
    pub fn clear(&self) {
        debug!("Status cache cleared");
        self.slot.send_replace(None);
    }

    /// The current snapshot, if any.
    pub fn current(&self) -> Option<Arc<WorkspaceStatus>> {
        self.slot.borrow().clone()
    }

    /// Receiver that is marked changed on every replace or clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<WorkspaceStatus>>> {
        self.slot.subscribe()
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new()
    }
}
