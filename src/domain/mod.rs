//! Workspace status types as emitted by `but --json status`.
//!
//! Every type here is an immutable snapshot. The tree projector reads them
//! and derives view state; nothing in this crate mutates a decoded status.
//!
//! `cli_id` fields are only valid for the snapshot that produced them and are
//! carried through untouched for follow-up invocations of the external tool.

use serde::{Deserialize, Deserializer, Serialize};

/// Status of the whole workspace at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStatus {
    /// Uncommitted changes not assigned to any stack
    pub unassigned_changes: Vec<FileChange>,
    /// Applied stacks, outermost first
    pub stacks: Vec<Stack>,
    /// Most recent commit shared by all applied stacks and the upstream target
    pub merge_base: Commit,
    pub upstream_state: UpstreamState,
}

/// How far the target upstream branch has moved past the merge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamState {
    /// Number of upstream commits not yet in the merge base
    pub behind: u64,
    pub latest_commit: Commit,
    /// RFC 3339 timestamp of the last fetch
    #[serde(default, deserialize_with = "lenient")]
    pub last_fetched: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    #[serde(default)]
    pub cli_id: String,
    /// Uncommitted changes assigned to this stack
    pub assigned_changes: Vec<FileChange>,
    /// Branches in this stack, newest first
    pub branches: Vec<Branch>,
}

impl Stack {
    /// Sum of local commits over every branch in the stack.
    pub fn total_commits(&self) -> usize {
        self.branches.iter().map(|b| b.commits.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(default)]
    pub cli_id: String,
    pub name: String,
    /// Local commits, newest first
    pub commits: Vec<Commit>,
    /// Commits only present on the upstream of this branch, newest first
    pub upstream_commits: Vec<Commit>,
    pub branch_status: BranchStatus,
    #[serde(default, deserialize_with = "lenient")]
    pub review_id: Option<String>,
}

/// Push state of a branch relative to its remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BranchStatus {
    NothingToPush,
    UnpushedCommits,
    UnpushedCommitsRequiringForce,
    CompletelyUnpushed,
    Integrated,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    #[serde(default)]
    pub cli_id: String,
    /// SHA-1 or SHA-256, depending on the repository
    pub commit_id: String,
    /// Formatted as `YYYY-MM-DD HH:MM:SS +ZZZZ`
    pub created_at: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    /// Only meaningful for local commits
    #[serde(default, deserialize_with = "lenient")]
    pub conflicted: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub review_id: Option<String>,
    /// Present only when file detail was requested (`--files`)
    #[serde(default, deserialize_with = "lenient_list")]
    pub changes: Option<Vec<FileChange>>,
}

impl Commit {
    pub fn is_conflicted(&self) -> bool {
        self.conflicted.unwrap_or(false)
    }

    /// True when the commit carries at least one file change.
    pub fn has_changes(&self) -> bool {
        self.changes.as_ref().is_some_and(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    #[serde(default)]
    pub cli_id: String,
    /// Relative path, UTF-8 (may be lossy on some platforms)
    pub file_path: String,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Renamed,
    #[serde(other)]
    Unknown,
}

/// Decode an optional field, treating a malformed value the same as an absent one.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode an optional list. A non-array value counts as absent, but every
/// element of an array must decode.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match serde_json::Value::deserialize(deserializer)? {
        value @ serde_json::Value::Array(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::STATUS_JSON;
    use super::*;

    #[test]
    fn test_decode_status_document() {
        let status: WorkspaceStatus = serde_json::from_str(STATUS_JSON).unwrap();

        assert_eq!(status.unassigned_changes.len(), 1);
        assert_eq!(status.unassigned_changes[0].change_type, ChangeType::Modified);

        let branch = &status.stacks[0].branches[0];
        assert_eq!(branch.name, "feature/api");
        assert_eq!(
            branch.branch_status,
            BranchStatus::UnpushedCommitsRequiringForce
        );
        assert_eq!(branch.review_id.as_deref(), Some("42"));
        assert!(branch.commits[0].has_changes());
        assert!(!branch.commits[0].is_conflicted());

        assert_eq!(status.merge_base.changes, None);
        assert_eq!(status.upstream_state.behind, 2);
        assert_eq!(
            status.upstream_state.last_fetched.as_deref(),
            Some("2024-03-02T12:05:00Z")
        );
    }

    #[test]
    fn test_unknown_enum_values_decode_to_unknown() {
        let change: FileChange = serde_json::from_str(
            r#"{ "cliId": "x", "filePath": "a.txt", "changeType": "typechange" }"#,
        )
        .unwrap();
        assert_eq!(change.change_type, ChangeType::Unknown);

        let status: BranchStatus = serde_json::from_str(r#""somethingNew""#).unwrap();
        assert_eq!(status, BranchStatus::Unknown);
    }

    #[test]
    fn test_malformed_optional_fields_are_absent() {
        let commit: Commit = serde_json::from_str(
            r#"{
                "commitId": "abc",
                "createdAt": "2024-01-01 00:00:00 +0000",
                "message": "m",
                "authorName": "a",
                "authorEmail": "a@b",
                "conflicted": "maybe",
                "reviewId": 17,
                "changes": null
            }"#,
        )
        .unwrap();

        assert_eq!(commit.cli_id, "");
        assert_eq!(commit.conflicted, None);
        assert_eq!(commit.review_id, None);
        assert_eq!(commit.changes, None);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result: Result<FileChange, _> =
            serde_json::from_str(r#"{ "cliId": "x", "changeType": "added" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_change_entry_fails_commit() {
        let commit = |changes: &str| {
            serde_json::from_str::<Commit>(&format!(
                r#"{{
                    "commitId": "abc",
                    "createdAt": "2024-01-01 00:00:00 +0000",
                    "message": "m",
                    "authorName": "a",
                    "authorEmail": "a@b",
                    "changes": {}
                }}"#,
                changes
            ))
        };

        assert!(commit(r#"[{ "changeType": "added" }]"#).is_err());
        assert!(commit(r#"[{ "filePath": "a.rs", "changeType": 3 }]"#).is_err());
        assert_eq!(commit(r#""oops""#).unwrap().changes, None);
        assert_eq!(
            commit(r#"[{ "filePath": "a.rs", "changeType": "added" }]"#)
                .unwrap()
                .changes
                .map(|c| c.len()),
            Some(1)
        );
    }

    #[test]
    fn test_total_commits() {
        let stack = fixtures::stack(vec![
            fixtures::branch("main", 2, BranchStatus::NothingToPush),
            fixtures::branch("feat", 3, BranchStatus::UnpushedCommits),
        ]);
        assert_eq!(stack.total_commits(), 5);
    }
}
