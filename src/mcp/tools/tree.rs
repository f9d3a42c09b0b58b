//! Tree navigation tools.

use rmcp::{model::*, ErrorData as McpError};
use tracing::debug;

use crate::mcp::types::GetChildrenArgs;
use crate::session::WorkspaceSession;
use crate::source::StatusSource;
use crate::tree::{Node, NodeId, TreeItem, TreeProvider};

use super::common::{json_result, not_a_repository, tool_error};

fn items(provider: &TreeProvider, nodes: &[Node]) -> Vec<TreeItem> {
    nodes.iter().map(|node| provider.tree_item(node)).collect()
}

/// Top-level tree items for the current snapshot
pub fn get_root_nodes<S: StatusSource>(
    session: &WorkspaceSession<S>,
) -> Result<CallToolResult, McpError> {
    let Some(provider) = session.tree() else {
        return Ok(not_a_repository());
    };
    json_result(&items(provider, &provider.root_nodes()))
}

/// Children of the node with the given id
pub fn get_children<S: StatusSource>(
    session: &WorkspaceSession<S>,
    args: GetChildrenArgs,
) -> Result<CallToolResult, McpError> {
    let Some(provider) = session.tree() else {
        return Ok(not_a_repository());
    };

    let id: NodeId = match args.node_id.parse() {
        Ok(id) => id,
        Err(e) => return Ok(tool_error(format!("Error: {}", e))),
    };

    let Some(node) = provider.resolve(id) else {
        debug!("Node {} not in current snapshot", id);
        return Ok(tool_error(format!(
            "Error: node '{}' does not exist in the current workspace status. Call get_root_nodes again.",
            id
        )));
    };

    json_result(&items(provider, &provider.children(Some(&node))))
}
