//! Workspace tree: node model, labeling rules and projection.
//!
//! The projector turns a [`WorkspaceStatus`](crate::domain::WorkspaceStatus)
//! into ordered nodes; the provider serves them from the status cache; the
//! renderer lays out a whole tree for terminal and JSON output.

mod labels;
mod node;
mod projector;
mod provider;
mod render;

pub use node::{Node, NodeId, TreeItem};
pub use provider::TreeProvider;
pub use render::{build, render_text, RenderOptions};
