//! Common utilities for MCP tools.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;

use crate::session::NOT_A_REPOSITORY;

/// Error result for tool failures
pub fn tool_error(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Informational result for a workspace that is not set up.
///
/// Not an error: the client asked a reasonable question about a directory
/// GitButler does not manage.
pub fn not_a_repository() -> CallToolResult {
    CallToolResult::success(vec![Content::text(NOT_A_REPOSITORY)])
}

/// Success result carrying pretty-printed JSON.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
