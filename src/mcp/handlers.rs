//! MCP server handlers.
//!
//! This module contains the MCP server startup logic.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::refresh::{watch_paths, ChangeWatcher};
use crate::session::WorkspaceSession;

use super::server::StackviewMcpServer;

/// Run the MCP server over stdio for the configured workspace.
pub async fn run_mcp_server(config: &Config) -> Result<()> {
    info!("🔧 Starting stackview MCP server...");
    info!("📂 Workspace: {}", config.workspace_root.display());

    let session = Arc::new(
        WorkspaceSession::init(
            &config.workspace_root,
            config.source(),
            config.refresh_settings(),
        )
        .await,
    );

    if !session.is_enabled() {
        warn!("Not a GitButler workspace; tools will report that until restarted");
    }

    // Keep the tree current between tool calls
    let _watcher = session.trigger().and_then(|trigger| {
        let paths = watch_paths(&config.workspace_root, config.watch_worktree);
        ChangeWatcher::start(&paths, trigger)
            .map_err(|e| warn!("File watching disabled: {:#}", e))
            .ok()
    });

    let server = StackviewMcpServer::new(session.clone());
    run_server(server).await?;

    if let Ok(session) = Arc::try_unwrap(session) {
        session.dispose();
    }
    Ok(())
}

/// Run the MCP server with the given server instance.
async fn run_server(server: StackviewMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("✅ MCP server started");
    info!("🔗 Ready for MCP client connections");

    // Start the service
    let service = server.serve(stdio()).await.map_err(|e| {
        error!("Failed to start MCP service: {:?}", e);
        anyhow::anyhow!("Failed to start MCP service: {:?}", e)
    })?;

    // Wait for service to complete
    service.waiting().await.map_err(|e| {
        error!("MCP service error: {:?}", e);
        anyhow::anyhow!("MCP service error: {:?}", e)
    })?;

    info!("MCP server shutting down");
    Ok(())
}
