//! MCP server implementation.
//!
//! This module contains the StackviewMcpServer struct and its tool routing.

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};

use crate::session::WorkspaceSession;
use crate::source::ButCli;

use super::tools;
use super::types::*;

/// The server sends no change notifications, so clients are told to poll.
const INSTRUCTIONS: &str = "Stackview exposes the GitButler workspace (stacks, branches, commits and uncommitted changes) as a tree. Start with get_root_nodes and expand with get_children.\n\nThe tree is kept current in the background as the repository changes, but no change notifications are sent: call get_root_nodes again to see updates, and walk down from the roots, since node ids from an earlier call may point elsewhere. Call refresh to force a fetch before reading.";

/// Stackview MCP Server
#[derive(Clone)]
pub struct StackviewMcpServer {
    session: Arc<WorkspaceSession<ButCli>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StackviewMcpServer {
    /// Create a server for an initialized workspace session
    pub fn new(session: Arc<WorkspaceSession<ButCli>>) -> Self {
        Self {
            session,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "get_root_nodes",
        description = "List the top-level nodes of the GitButler workspace tree: unassigned changes, one node per stack, and an upstream summary when the target branch has new commits.\n\nEach item carries an `id` to pass to get_children, a `label`, an optional `description` and `tooltip`, and `collapsible` (none, collapsed or expanded)."
    )]
    fn get_root_nodes(
        &self,
        Parameters(_): Parameters<GetRootNodesArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_root_nodes(&*self.session)
    }

    #[tool(
        name = "get_children",
        description = "List the children of a workspace tree node. Node ids are positional and only valid for the status they were read from; after a refresh, walk down from get_root_nodes again."
    )]
    fn get_children(
        &self,
        Parameters(args): Parameters<GetChildrenArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::get_children(&*self.session, args)
    }

    #[tool(
        name = "refresh",
        description = "Fetch a fresh workspace status from the GitButler CLI now."
    )]
    async fn refresh(
        &self,
        Parameters(_): Parameters<RefreshArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::refresh(&*self.session).await
    }

    #[tool(
        name = "open_file",
        description = "Resolve a changed file in the workspace so the client can open it."
    )]
    async fn open_file(
        &self,
        Parameters(args): Parameters<OpenFileArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::open_file(&*self.session, args).await
    }

    #[tool(name = "show_branch", description = "Show a branch by name.")]
    async fn show_branch(
        &self,
        Parameters(args): Parameters<ShowBranchArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::show_branch(&*self.session, args).await
    }

    #[tool(name = "show_commit", description = "Show a commit by id.")]
    async fn show_commit(
        &self,
        Parameters(args): Parameters<ShowCommitArgs>,
    ) -> Result<CallToolResult, McpError> {
        tools::show_commit(&*self.session, args).await
    }
}

#[tool_handler]
impl ServerHandler for StackviewMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stackview".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
