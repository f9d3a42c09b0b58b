//! Projection of a status snapshot into tree nodes.
//!
//! All functions here are pure: the same snapshot and node always give the
//! same children in the same order.

use chrono::{DateTime, Utc};

use crate::domain::{FileChange, WorkspaceStatus};

use super::labels;
use super::node::{
    Category, ChangesScope, Collapsible, Node, NodeCommand, NodeId, NodeKind, TreeItem,
};

/// Top-level nodes: unassigned changes, then stacks, then the upstream summary.
pub fn root_nodes(status: &WorkspaceStatus) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(status.stacks.len() + 2);

    if !status.unassigned_changes.is_empty() {
        nodes.push(Node::new(
            NodeId::Unassigned,
            NodeKind::Changes {
                scope: ChangesScope::Unassigned,
                changes: status.unassigned_changes.clone(),
            },
        ));
    }

    nodes.extend(
        status
            .stacks
            .iter()
            .enumerate()
            .map(|(s, stack)| Node::new(NodeId::Stack(s), NodeKind::Stack(stack.clone()))),
    );

    if status.upstream_state.behind > 0 {
        nodes.push(Node::new(
            NodeId::Upstream,
            NodeKind::Upstream(status.upstream_state.clone()),
        ));
    }

    nodes
}

fn file_nodes(changes: &[FileChange], id: impl Fn(usize) -> NodeId) -> Vec<Node> {
    changes
        .iter()
        .enumerate()
        .map(|(i, change)| Node::new(id(i), NodeKind::File(change.clone())))
        .collect()
}

/// Children of `node`, derived only from the data the node carries.
pub fn children(node: &Node) -> Vec<Node> {
    match (&node.kind, node.id) {
        (NodeKind::Changes { changes, .. }, NodeId::Unassigned) => {
            file_nodes(changes, NodeId::UnassignedFile)
        }
        (NodeKind::Changes { changes, .. }, NodeId::AssignedChanges(s)) => {
            file_nodes(changes, |i| NodeId::AssignedFile(s, i))
        }
        (NodeKind::Stack(stack), NodeId::Stack(s)) => {
            let mut nodes = Vec::with_capacity(stack.branches.len() + 1);
            if !stack.assigned_changes.is_empty() {
                nodes.push(Node::new(
                    NodeId::AssignedChanges(s),
                    NodeKind::Changes {
                        scope: ChangesScope::Assigned,
                        changes: stack.assigned_changes.clone(),
                    },
                ));
            }
            nodes.extend(
                stack.branches.iter().enumerate().map(|(b, branch)| {
                    Node::new(NodeId::Branch(s, b), NodeKind::Branch(branch.clone()))
                }),
            );
            nodes
        }
        (NodeKind::Branch(branch), NodeId::Branch(s, b)) => branch
            .commits
            .iter()
            .enumerate()
            .map(|(c, commit)| Node::new(NodeId::Commit(s, b, c), NodeKind::Commit(commit.clone())))
            .collect(),
        (NodeKind::Commit(commit), NodeId::Commit(s, b, c)) => match &commit.changes {
            Some(changes) => file_nodes(changes, |i| NodeId::CommitFile(s, b, c, i)),
            None => Vec::new(),
        },
        // Files are leaves; the upstream summary has nothing to expand yet.
        _ => Vec::new(),
    }
}

/// Look up the node an id points at in `status`, if it still exists.
pub fn resolve(status: &WorkspaceStatus, id: NodeId) -> Option<Node> {
    let kind = match id {
        NodeId::Unassigned => {
            if status.unassigned_changes.is_empty() {
                return None;
            }
            NodeKind::Changes {
                scope: ChangesScope::Unassigned,
                changes: status.unassigned_changes.clone(),
            }
        }
        NodeId::UnassignedFile(i) => NodeKind::File(status.unassigned_changes.get(i)?.clone()),
        NodeId::Stack(s) => NodeKind::Stack(status.stacks.get(s)?.clone()),
        NodeId::AssignedChanges(s) => {
            let stack = status.stacks.get(s)?;
            if stack.assigned_changes.is_empty() {
                return None;
            }
            NodeKind::Changes {
                scope: ChangesScope::Assigned,
                changes: stack.assigned_changes.clone(),
            }
        }
        NodeId::AssignedFile(s, i) => {
            NodeKind::File(status.stacks.get(s)?.assigned_changes.get(i)?.clone())
        }
        NodeId::Branch(s, b) => NodeKind::Branch(status.stacks.get(s)?.branches.get(b)?.clone()),
        NodeId::Commit(s, b, c) => NodeKind::Commit(
            status
                .stacks
                .get(s)?
                .branches
                .get(b)?
                .commits
                .get(c)?
                .clone(),
        ),
        NodeId::CommitFile(s, b, c, i) => NodeKind::File(
            status
                .stacks
                .get(s)?
                .branches
                .get(b)?
                .commits
                .get(c)?
                .changes
                .as_ref()?
                .get(i)?
                .clone(),
        ),
        NodeId::Upstream => {
            if status.upstream_state.behind == 0 {
                return None;
            }
            NodeKind::Upstream(status.upstream_state.clone())
        }
    };
    Some(Node::new(id, kind))
}

/// Display metadata for a node. `now` anchors relative commit dates.
pub fn tree_item(node: &Node, now: DateTime<Utc>) -> TreeItem {
    match &node.kind {
        NodeKind::Changes { scope, changes } => {
            let collapsible = match scope {
                ChangesScope::Unassigned => Collapsible::Expanded,
                ChangesScope::Assigned => Collapsible::Collapsed,
            };
            TreeItem::new(
                node.id,
                labels::changes_label(*scope, changes.len()),
                Category::Changes,
                collapsible,
            )
        }
        NodeKind::Stack(stack) => TreeItem::new(
            node.id,
            labels::stack_label(stack),
            Category::Stack,
            Collapsible::Expanded,
        ),
        NodeKind::Branch(branch) => TreeItem::new(
            node.id,
            branch.name.clone(),
            Category::for_branch(branch.branch_status),
            Collapsible::Expanded,
        )
        .with_description(labels::branch_description(branch))
        .with_tooltip(labels::branch_tooltip(branch)),
        NodeKind::Commit(commit) => {
            let category = if commit.is_conflicted() {
                Category::ConflictedCommit
            } else {
                Category::Commit
            };
            let collapsible = if commit.has_changes() {
                Collapsible::Collapsed
            } else {
                Collapsible::None
            };
            TreeItem::new(node.id, labels::commit_label(&commit.message), category, collapsible)
                .with_description(labels::relative_date(&commit.created_at, now))
                .with_tooltip(labels::commit_tooltip(commit))
        }
        NodeKind::File(change) => TreeItem::new(
            node.id,
            change.file_path.clone(),
            Category::for_change(change.change_type),
            Collapsible::None,
        )
        .with_command(NodeCommand::OpenFile {
            file_path: change.file_path.clone(),
        }),
        NodeKind::Upstream(upstream) => TreeItem::new(
            node.id,
            labels::upstream_label(upstream),
            Category::Upstream,
            Collapsible::Collapsed,
        )
        .with_tooltip(labels::upstream_tooltip(upstream)),
    }
}
