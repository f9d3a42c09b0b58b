//! Action tools. Each call gets its own recording host so concurrent calls
//! never see each other's messages.

use rmcp::{model::*, ErrorData as McpError};

use crate::host::{RecordingHost, Severity};
use crate::mcp::types::{OpenFileArgs, ShowBranchArgs, ShowCommitArgs};
use crate::session::{Action, WorkspaceSession};
use crate::source::StatusSource;

async fn run<S: StatusSource>(
    session: &WorkspaceSession<S>,
    action: Action,
    done: &str,
) -> Result<CallToolResult, McpError> {
    let host = RecordingHost::new();
    let ok = session.run_action(action, &host).await;

    let mut lines: Vec<String> = host
        .take_opened()
        .into_iter()
        .map(|path| format!("Open: {}", path))
        .collect();
    let messages = host.take_messages();
    let failed = !ok && messages.iter().any(|m| m.severity == Severity::Error);
    lines.extend(messages.into_iter().map(|m| m.text));
    if lines.is_empty() {
        lines.push(done.to_string());
    }

    let content = vec![Content::text(lines.join("\n"))];
    Ok(if failed {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    })
}

/// Fetch a fresh workspace status now
pub async fn refresh<S: StatusSource>(
    session: &WorkspaceSession<S>,
) -> Result<CallToolResult, McpError> {
    run(session, Action::Refresh, "Workspace status refreshed").await
}

pub async fn open_file<S: StatusSource>(
    session: &WorkspaceSession<S>,
    args: OpenFileArgs,
) -> Result<CallToolResult, McpError> {
    run(session, Action::OpenFile(args.file_path), "File opened").await
}

pub async fn show_branch<S: StatusSource>(
    session: &WorkspaceSession<S>,
    args: ShowBranchArgs,
) -> Result<CallToolResult, McpError> {
    run(session, Action::ShowBranch(args.branch_name), "Done").await
}

pub async fn show_commit<S: StatusSource>(
    session: &WorkspaceSession<S>,
    args: ShowCommitArgs,
) -> Result<CallToolResult, McpError> {
    run(session, Action::ShowCommit(args.commit_id), "Done").await
}
