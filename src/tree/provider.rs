//! Tree data provider backed by the status cache.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::domain::WorkspaceStatus;
use crate::workspace::StatusCache;

use super::node::{Node, NodeId, TreeItem};
use super::projector;

/// What view hosts call to walk the tree.
///
/// Nodes are always re-resolved against the current snapshot, so a node
/// obtained before a refresh never yields children from the old snapshot.
#[derive(Debug, Clone)]
pub struct TreeProvider {
    cache: Arc<StatusCache>,
}

impl TreeProvider {
    pub fn new(cache: Arc<StatusCache>) -> Self {
        Self { cache }
    }

    /// Current snapshot, for hosts that render a whole tree in one pass.
    pub fn snapshot(&self) -> Option<Arc<WorkspaceStatus>> {
        self.cache.current()
    }

    pub fn root_nodes(&self) -> Vec<Node> {
        self.cache
            .current()
            .map(|status| projector::root_nodes(&status))
            .unwrap_or_default()
    }

    /// Children of `node`, or the root nodes when `node` is `None`.
    pub fn children(&self, node: Option<&Node>) -> Vec<Node> {
        let Some(node) = node else {
            return self.root_nodes();
        };
        self.resolve(node.id)
            .map(|current| projector::children(&current))
            .unwrap_or_default()
    }

    pub fn resolve(&self, id: NodeId) -> Option<Node> {
        let status = self.cache.current()?;
        projector::resolve(&status, id)
    }

    pub fn tree_item(&self, node: &Node) -> TreeItem {
        projector::tree_item(node, Utc::now())
    }

    /// Subscribe to "tree changed" notifications (root and below).
    pub fn changes(&self) -> TreeChanges {
        TreeChanges {
            rx: self.cache.subscribe(),
        }
    }
}

/// Receiver for "tree changed" notifications.
pub struct TreeChanges {
    rx: watch::Receiver<Option<Arc<WorkspaceStatus>>>,
}

impl TreeChanges {
    /// Wait until the cache is replaced or cleared.
    ///
    /// Returns `false` once the cache has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
