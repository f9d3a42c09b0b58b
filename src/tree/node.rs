//! Tree node types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{Branch, BranchStatus, ChangeType, Commit, FileChange, Stack, UpstreamState};

/// Positional address of a node within one snapshot.
///
/// Ids are snapshot-scoped: after a refresh the same id may point at a
/// different entity, or at nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Unassigned,
    UnassignedFile(usize),
    Stack(usize),
    AssignedChanges(usize),
    AssignedFile(usize, usize),
    Branch(usize, usize),
    Commit(usize, usize, usize),
    CommitFile(usize, usize, usize, usize),
    Upstream,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Unassigned => write!(f, "unassigned"),
            NodeId::UnassignedFile(i) => write!(f, "unassigned/{}", i),
            NodeId::Stack(s) => write!(f, "stack/{}", s),
            NodeId::AssignedChanges(s) => write!(f, "stack/{}/assigned", s),
            NodeId::AssignedFile(s, i) => write!(f, "stack/{}/assigned/{}", s, i),
            NodeId::Branch(s, b) => write!(f, "stack/{}/branch/{}", s, b),
            NodeId::Commit(s, b, c) => write!(f, "stack/{}/branch/{}/commit/{}", s, b, c),
            NodeId::CommitFile(s, b, c, i) => {
                write!(f, "stack/{}/branch/{}/commit/{}/file/{}", s, b, c, i)
            }
            NodeId::Upstream => write!(f, "upstream"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid node id: {0}")]
pub struct ParseNodeIdError(String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().trim_matches('/').split('/').collect();
        let id = match parts.as_slice() {
            ["unassigned"] => NodeId::Unassigned,
            ["unassigned", i] => NodeId::UnassignedFile(index(i, s)?),
            ["stack", st] => NodeId::Stack(index(st, s)?),
            ["stack", st, "assigned"] => NodeId::AssignedChanges(index(st, s)?),
            ["stack", st, "assigned", i] => NodeId::AssignedFile(index(st, s)?, index(i, s)?),
            ["stack", st, "branch", b] => NodeId::Branch(index(st, s)?, index(b, s)?),
            ["stack", st, "branch", b, "commit", c] => {
                NodeId::Commit(index(st, s)?, index(b, s)?, index(c, s)?)
            }
            ["stack", st, "branch", b, "commit", c, "file", i] => NodeId::CommitFile(
                index(st, s)?,
                index(b, s)?,
                index(c, s)?,
                index(i, s)?,
            ),
            ["upstream"] => NodeId::Upstream,
            _ => return Err(ParseNodeIdError(s.to_string())),
        };
        Ok(id)
    }
}

fn index(part: &str, id: &str) -> Result<usize, ParseNodeIdError> {
    part.parse().map_err(|_| ParseNodeIdError(id.to_string()))
}

/// Which set of uncommitted changes a group node shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangesScope {
    /// Workspace-level changes not assigned to any stack
    Unassigned,
    /// Changes assigned to a stack but not yet committed
    Assigned,
}

/// A node in the workspace tree, carrying the data its display derives from.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Changes {
        scope: ChangesScope,
        changes: Vec<FileChange>,
    },
    Stack(Stack),
    Branch(Branch),
    Commit(Commit),
    File(FileChange),
    Upstream(UpstreamState),
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self { id, kind }
    }
}

/// Semantic icon category. Hosts pick the actual icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Changes,
    Stack,
    Branch,
    BranchUnpushed,
    BranchForcePush,
    BranchNotPushed,
    BranchIntegrated,
    Commit,
    ConflictedCommit,
    FileAdded,
    FileRemoved,
    FileModified,
    FileRenamed,
    Upstream,
    Unknown,
}

impl Category {
    pub fn for_branch(status: BranchStatus) -> Self {
        match status {
            BranchStatus::NothingToPush => Category::Branch,
            BranchStatus::UnpushedCommits => Category::BranchUnpushed,
            BranchStatus::UnpushedCommitsRequiringForce => Category::BranchForcePush,
            BranchStatus::CompletelyUnpushed => Category::BranchNotPushed,
            BranchStatus::Integrated => Category::BranchIntegrated,
            BranchStatus::Unknown => Category::Unknown,
        }
    }

    pub fn for_change(change_type: ChangeType) -> Self {
        match change_type {
            ChangeType::Added => Category::FileAdded,
            ChangeType::Removed => Category::FileRemoved,
            ChangeType::Modified => Category::FileModified,
            ChangeType::Renamed => Category::FileRenamed,
            ChangeType::Unknown => Category::Unknown,
        }
    }

    /// Codicon name, for editor hosts.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Changes => "files",
            Category::Stack => "layers",
            Category::Branch => "git-branch",
            Category::BranchUnpushed => "arrow-up",
            Category::BranchForcePush => "warning",
            Category::BranchNotPushed => "cloud-upload",
            Category::BranchIntegrated => "check",
            Category::Commit => "git-commit",
            Category::ConflictedCommit => "error",
            Category::FileAdded => "diff-added",
            Category::FileRemoved => "diff-removed",
            Category::FileModified => "diff-modified",
            Category::FileRenamed => "diff-renamed",
            Category::Upstream => "cloud",
            Category::Unknown => "question",
        }
    }

    /// Single-column glyph for terminal rendering.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::Changes => "●",
            Category::Stack => "≡",
            Category::Branch => "⎇",
            Category::BranchUnpushed => "↑",
            Category::BranchForcePush => "!",
            Category::BranchNotPushed => "○",
            Category::BranchIntegrated => "✓",
            Category::Commit => "•",
            Category::ConflictedCommit => "✗",
            Category::FileAdded => "A",
            Category::FileRemoved => "D",
            Category::FileModified => "M",
            Category::FileRenamed => "R",
            Category::Upstream => "☁",
            Category::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Collapsible {
    /// Leaf node
    None,
    Collapsed,
    Expanded,
}

/// Command a host runs when the node is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum NodeCommand {
    OpenFile {
        #[serde(rename = "filePath")]
        file_path: String,
    },
}

/// Display metadata for one node, ready for a host to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    pub category: Category,
    pub icon: &'static str,
    pub collapsible: Collapsible,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<NodeCommand>,
}

impl TreeItem {
    pub fn new(id: NodeId, label: String, category: Category, collapsible: Collapsible) -> Self {
        Self {
            id: id.to_string(),
            label,
            description: None,
            tooltip: None,
            category,
            icon: category.icon(),
            collapsible,
            command: None,
        }
    }

    /// Set the description; an empty string leaves it unset.
    pub fn with_description(mut self, description: String) -> Self {
        if !description.is_empty() {
            self.description = Some(description);
        }
        self
    }

    pub fn with_tooltip(mut self, tooltip: String) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn with_command(mut self, command: NodeCommand) -> Self {
        self.command = Some(command);
        self
    }
}
