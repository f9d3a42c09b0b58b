//! Label, description and tooltip rules.
//!
//! The exact strings here are what users see in the tree, so they are kept
//! deliberately literal (no plural correction on relative dates, for one).

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::{Branch, BranchStatus, Commit, Stack, UpstreamState};

use super::node::ChangesScope;

/// Commit labels are cut to this many characters (Unicode scalar values).
pub const COMMIT_LABEL_MAX_CHARS: usize = 80;

const SEPARATOR: &str = " • ";

/// Timestamp format used by `but` for `createdAt`.
const COMMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

pub fn changes_label(scope: ChangesScope, count: usize) -> String {
    match scope {
        ChangesScope::Unassigned => format!("Unassigned Changes ({})", count),
        ChangesScope::Assigned => format!("Uncommitted Changes ({})", count),
    }
}

pub fn stack_label(stack: &Stack) -> String {
    match stack.branches.as_slice() {
        [] => "Stack (no branches)".to_string(),
        [only] => only.name.clone(),
        [first, rest @ ..] => format!(
            "{} (+{} more, {} commits)",
            first.name,
            rest.len(),
            stack.total_commits()
        ),
    }
}

/// Short push-state word shown next to a branch, if any.
fn branch_status_tag(status: BranchStatus) -> Option<&'static str> {
    match status {
        BranchStatus::UnpushedCommits => Some("unpushed"),
        BranchStatus::UnpushedCommitsRequiringForce => Some("force push required"),
        BranchStatus::CompletelyUnpushed => Some("not pushed"),
        BranchStatus::NothingToPush | BranchStatus::Integrated | BranchStatus::Unknown => None,
    }
}

pub fn branch_description(branch: &Branch) -> String {
    let mut parts: Vec<String> = Vec::new();

    let count = branch.commits.len();
    if count > 0 {
        parts.push(format!(
            "{} commit{}",
            count,
            if count != 1 { "s" } else { "" }
        ));
    }
    if let Some(tag) = branch_status_tag(branch.branch_status) {
        parts.push(tag.to_string());
    }

    parts.join(SEPARATOR)
}

pub fn branch_status_text(status: BranchStatus) -> &'static str {
    match status {
        BranchStatus::NothingToPush => "Up to date",
        BranchStatus::UnpushedCommits => "Unpushed commits",
        BranchStatus::UnpushedCommitsRequiringForce => "Force push required",
        BranchStatus::CompletelyUnpushed => "Not pushed",
        BranchStatus::Integrated => "Integrated",
        BranchStatus::Unknown => "Unknown",
    }
}

pub fn branch_tooltip(branch: &Branch) -> String {
    let mut lines = vec![branch.name.clone()];

    if let Some(review_id) = &branch.review_id {
        lines.push(format!("Review: {}", review_id));
    }
    lines.push(format!("Status: {}", branch_status_text(branch.branch_status)));
    lines.push(format!("Commits: {}", branch.commits.len()));
    if !branch.upstream_commits.is_empty() {
        lines.push(format!("Upstream commits: {}", branch.upstream_commits.len()));
    }

    lines.join("\n")
}

/// First line of a commit message, truncated by code point.
pub fn commit_label(message: &str) -> String {
    message
        .split('\n')
        .next()
        .unwrap_or_default()
        .chars()
        .take(COMMIT_LABEL_MAX_CHARS)
        .collect()
}

pub fn commit_tooltip(commit: &Commit) -> String {
    let mut lines = vec![
        commit.message.clone(),
        String::new(),
        format!("Author: {} <{}>", commit.author_name, commit.author_email),
        format!("Date: {}", commit.created_at),
        format!("SHA: {}", commit.commit_id),
    ];

    if commit.is_conflicted() {
        lines.push("⚠️ Has conflicts".to_string());
    }
    if let Some(review_id) = &commit.review_id {
        lines.push(format!("Review: {}", review_id));
    }

    lines.join("\n")
}

/// Parse a commit timestamp, accepting RFC 3339 as a fallback.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), COMMIT_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .ok()
}

/// Bucket `created_at` relative to `now`. Unparsable input is returned as-is.
///
/// Timestamps in the future count as "today".
pub fn relative_date(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(created_at) else {
        return created_at.to_string();
    };

    let days = now
        .signed_duration_since(date.with_timezone(&Utc))
        .num_days()
        .max(0);

    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

pub fn upstream_label(upstream: &UpstreamState) -> String {
    format!("Upstream ({} commits ahead)", upstream.behind)
}

pub fn upstream_tooltip(upstream: &UpstreamState) -> String {
    let latest = &upstream.latest_commit;
    let mut lines = vec![
        format!("Latest: {}", commit_label(&latest.message)),
        format!("SHA: {}", latest.commit_id),
    ];
    if let Some(fetched) = &upstream.last_fetched {
        lines.push(format!("Last fetched: {}", fetched));
    }
    lines.join("\n")
}
