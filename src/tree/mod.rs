//! Tree Builder
//!
//! Converts the flat, parent-referencing node list into a nested tree view.
//! The nested view is a disposable projection: it never owns the data and is
//! rebuilt from the flat cache after every committed mutation. Code holding
//! a `TreeNode` across a mutation must re-resolve it by id.

pub mod moves;

use crate::node::{Node, NodeKind};
use crate::types::NodeId;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A node decorated with its nested children and presentation state.
///
/// `depth` counts from the built roots: the tree root's direct children are
/// depth 0. `expanded` is presentation-only and never sent to the remote
/// store.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub node: Node,
    pub depth: usize,
    pub expanded: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }
}

/// Build the nested tree of everything below `root_id`.
///
/// Children are sorted folders-first, ties broken by case-sensitive byte
/// comparison of names ascending (not locale collation). Deterministic:
/// the same flat input always yields a deep-equal tree. An empty input or
/// a `root_id` not present in the list yields an empty sequence. A visited
/// guard makes the recursion safe even against a corrupt cyclic input.
pub fn build(nodes: &[Node], root_id: &NodeId) -> Vec<TreeNode> {
    if !nodes.iter().any(|n| &n.id == root_id) {
        return Vec::new();
    }
    let mut by_parent: HashMap<&NodeId, Vec<&Node>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = &node.parent_id {
            by_parent.entry(parent).or_default().push(node);
        }
    }
    let mut visited = HashSet::new();
    visited.insert(root_id.clone());
    build_children(&by_parent, root_id, 0, &mut visited)
}

fn build_children(
    by_parent: &HashMap<&NodeId, Vec<&Node>>,
    parent_id: &NodeId,
    depth: usize,
    visited: &mut HashSet<NodeId>,
) -> Vec<TreeNode> {
    let mut children = Vec::new();
    if let Some(direct) = by_parent.get(parent_id) {
        for node in direct {
            if !visited.insert(node.id.clone()) {
                continue;
            }
            children.push(TreeNode {
                node: (*node).clone(),
                depth,
                expanded: false,
                children: build_children(by_parent, &node.id, depth + 1, visited),
            });
        }
    }
    children.sort_by(|a, b| match (a.node.kind, b.node.kind) {
        (NodeKind::Folder, NodeKind::File) => std::cmp::Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => std::cmp::Ordering::Greater,
        _ => a.node.name.cmp(&b.node.name),
    });
    children
}

/// The unique root: the node with the null parent sentinel.
pub fn find_root(nodes: &[Node]) -> Option<&Node> {
    nodes.iter().find(|n| n.parent_id.is_none())
}

/// Find a node in a built tree by id.
pub fn find<'a>(tree: &'a [TreeNode], id: &NodeId) -> Option<&'a TreeNode> {
    for node in tree {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// All ids transitively reachable below `id` via `parent_id`, computed over
/// the flat list. Does not include `id` itself.
///
/// Only folders are recursed into; a well-formed cache never parents a node
/// under a file.
pub fn descendant_ids(nodes: &[Node], id: &NodeId) -> Vec<NodeId> {
    let mut descendants = Vec::new();
    for child in nodes.iter().filter(|n| n.parent_id.as_ref() == Some(id)) {
        descendants.push(child.id.clone());
        if child.is_folder() {
            descendants.extend(descendant_ids(nodes, &child.id));
        }
    }
    descendants
}

/// Stamp expansion flags from a set of expanded folder ids.
pub fn apply_expansion(tree: &mut [TreeNode], expanded: &HashSet<NodeId>) {
    for node in tree {
        node.expanded = expanded.contains(node.id());
        apply_expansion(&mut node.children, expanded);
    }
}

/// Collect every folder in the built tree except those in `exclude`,
/// sorted by name. Used to offer batch-move destinations without listing
/// the items being moved.
pub fn folders(tree: &[TreeNode], exclude: &BTreeSet<NodeId>) -> Vec<Node> {
    fn collect(tree: &[TreeNode], exclude: &BTreeSet<NodeId>, out: &mut Vec<Node>) {
        for node in tree {
            if node.node.is_folder() {
                if !exclude.contains(node.id()) {
                    out.push(node.node.clone());
                }
                collect(&node.children, exclude, out);
            }
        }
    }
    let mut out = Vec::new();
    collect(tree, exclude, &mut out);
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Human-readable ancestry path ("root / Docs / a.pdf") computed by walking
/// the parent chain over the flat list. Stops at the root, a missing
/// parent, or a repeated id.
pub fn folder_path(nodes: &[Node], id: &NodeId) -> Option<String> {
    let mut current = nodes.iter().find(|n| &n.id == id)?;
    let mut segments = vec![current.name.clone()];
    let mut seen = HashSet::new();
    seen.insert(current.id.clone());
    while let Some(parent_id) = &current.parent_id {
        match nodes.iter().find(|n| &n.id == parent_id) {
            Some(parent) if seen.insert(parent.id.clone()) => {
                segments.push(parent.name.clone());
                current = parent;
            }
            _ => break,
        }
    }
    segments.reverse();
    Some(segments.join(" / "))
}
