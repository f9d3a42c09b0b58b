//! MCP tool parameter types.
//!
//! These types are used with rmcp's `Parameters<T>` wrapper for automatic
//! deserialization and JSON schema generation.

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters for the get_root_nodes tool (no arguments needed)
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetRootNodesArgs {}

/// Parameters for the get_children tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetChildrenArgs {
    /// Node id as returned by get_root_nodes or get_children, e.g. "stack/0/branch/1"
    pub node_id: String,
}

/// Parameters for the refresh tool (no arguments needed)
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RefreshArgs {}

/// Parameters for the open_file tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenFileArgs {
    /// Path of the file, relative to the workspace root
    pub file_path: String,
}

/// Parameters for the show_branch tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShowBranchArgs {
    /// Branch name
    pub branch_name: String,
}

/// Parameters for the show_commit tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShowCommitArgs {
    /// Commit SHA
    pub commit_id: String,
}
