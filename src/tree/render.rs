//! Whole-tree rendering for hosts without an interactive tree widget.
//!
//! Rendering works on one snapshot so that a refresh landing mid-render
//! cannot mix two snapshots into one tree.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::WorkspaceStatus;

use super::node::{Collapsible, Node, TreeItem};
use super::projector;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Expand collapsed nodes too, not just the ones expanded by default
    pub expand_all: bool,
}

impl RenderOptions {
    fn expands(&self, collapsible: Collapsible) -> bool {
        match collapsible {
            Collapsible::Expanded => true,
            Collapsible::Collapsed => self.expand_all,
            Collapsible::None => false,
        }
    }
}

/// A tree item together with its expanded children.
#[derive(Debug, Serialize)]
pub struct RenderedNode {
    #[serde(flatten)]
    pub item: TreeItem,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedNode>,
}

/// Build the visible tree for a snapshot.
pub fn build(
    status: &WorkspaceStatus,
    options: RenderOptions,
    now: DateTime<Utc>,
) -> Vec<RenderedNode> {
    projector::root_nodes(status)
        .iter()
        .map(|node| build_node(node, options, now))
        .collect()
}

fn build_node(node: &Node, options: RenderOptions, now: DateTime<Utc>) -> RenderedNode {
    let item = projector::tree_item(node, now);
    let children = if options.expands(item.collapsible) {
        projector::children(node)
            .iter()
            .map(|child| build_node(child, options, now))
            .collect()
    } else {
        Vec::new()
    };
    RenderedNode { item, children }
}

/// Plain-text rendering, two spaces of indent per level.
pub fn render_text(nodes: &[RenderedNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &RenderedNode, depth: usize) {
    let item = &node.item;
    let marker = match item.collapsible {
        Collapsible::Expanded if !node.children.is_empty() => "▾",
        Collapsible::Expanded | Collapsible::Collapsed => "▸",
        Collapsible::None => " ",
    };

    out.push_str(&"  ".repeat(depth));
    out.push_str(marker);
    out.push(' ');
    out.push_str(item.category.glyph());
    out.push(' ');
    out.push_str(&item.label);
    if let Some(description) = &item.description {
        out.push_str("  ");
        out.push_str(description);
    }
    out.push('\n');

    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{branch, commit, file, stack, status};
    use crate::domain::{BranchStatus, ChangeType};

    fn sample() -> WorkspaceStatus {
        let mut c = commit("c1", "Add parser\n\nbody");
        c.created_at = Utc::now().format("%Y-%m-%d %H:%M:%S %z").to_string();
        c.changes = Some(vec![file("src/parser.rs", ChangeType::Added)]);

        let mut b = branch("feature", 0, BranchStatus::CompletelyUnpushed);
        b.commits = vec![c];

        status(
            vec![file("README.md", ChangeType::Modified)],
            vec![stack(vec![b])],
            3,
        )
    }

    #[test]
    fn test_render_text_default_expansion() {
        let text = render_text(&build(&sample(), RenderOptions::default(), Utc::now()));
        assert_eq!(
            text,
            "▾ ● Unassigned Changes (1)\n\
             \x20   M README.md\n\
             ▾ ≡ feature\n\
             \x20 ▾ ○ feature  1 commit • not pushed\n\
             \x20   ▸ • Add parser  today\n\
             ▸ ☁ Upstream (3 commits ahead)\n"
        );
    }

    #[test]
    fn test_render_expand_all_opens_commits() {
        let nodes = build(
            &sample(),
            RenderOptions { expand_all: true },
            Utc::now(),
        );
        let text = render_text(&nodes);
        assert!(text.contains("\n        A src/parser.rs\n"));
    }

    #[test]
    fn test_render_json_nests_children() {
        let nodes = build(&sample(), RenderOptions::default(), Utc::now());
        let json = serde_json::to_value(&nodes).unwrap();

        assert_eq!(json[0]["id"], "unassigned");
        assert_eq!(json[0]["children"][0]["label"], "README.md");
        assert_eq!(json[1]["children"][0]["id"], "stack/0/branch/0");
        assert!(json[2].get("children").is_none());
    }
}
