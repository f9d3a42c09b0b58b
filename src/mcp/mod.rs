//! MCP (Model Context Protocol) server implementation using rmcp.
//!
//! The server is a view host for the workspace tree: clients walk the tree
//! with get_root_nodes / get_children and invoke the same actions a terminal
//! user can.

mod handlers;
mod server;
mod tools;
pub mod types;

pub use handlers::run_mcp_server;
