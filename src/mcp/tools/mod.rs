//! MCP tool implementations.
//!
//! Tools are generic over the status source so they can be exercised without
//! the `but` binary.

mod actions;
mod common;
mod tree;

pub use actions::{open_file, refresh, show_branch, show_commit};
pub use tree::{get_children, get_root_nodes};
