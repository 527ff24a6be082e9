//! Arena-backed element tree
//!
//! Nodes live in a flat table keyed by [`NodeId`]. Ownership is expressed only
//! through the ordered root list and each node's child id list, so every node
//! has at most one parent and the hierarchy cannot share or cycle.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::NodeDefaults;
use super::node::{Node, NodeId};
use super::symbols::ElementKind;

/// Errors from structural tree edits
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("cannot move {node} under its own descendant {target}")]
    Cycle { node: NodeId, target: NodeId },

    #[error("invalid tree snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Owning store of a node hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeSnapshot", into = "TreeSnapshot")]
pub struct ElementTree {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u64,
    defaults: NodeDefaults,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create an empty tree using the built-in default table
    pub fn new() -> Self {
        Self::with_defaults(NodeDefaults::default())
    }

    /// Create an empty tree whose factory uses `defaults`
    pub fn with_defaults(defaults: NodeDefaults) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
            defaults,
        }
    }

    pub fn defaults(&self) -> &NodeDefaults {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in order; their implicit parent is the canvas
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access to a node's fields; links stay under the tree's control
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Ordered children of `id`, empty for unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Siblings list that `id` belongs to (the root list for top-level nodes)
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    /// Create a node seeded from the default table and append it to `parent`
    /// (or to the root list).
    pub fn create(
        &mut self,
        kind: ElementKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        if let Some(p) = parent {
            if !self.contains(p) {
                return Err(TreeError::UnknownNode(p));
            }
        }

        let id = self.allocate_id();
        let mut node = self.defaults.node(id, kind);
        node.parent = parent;
        self.nodes.insert(id, node);
        self.link(id, parent, None);
        Ok(id)
    }

    /// Detach `id` from its parent and drop its whole subtree.
    /// Returns the removed nodes, `id` first.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<Node>, TreeError> {
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id));
        }
        self.unlink(id);

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children.iter().rev().copied());
                removed.push(node);
            }
        }
        Ok(removed)
    }

    /// Reparent `id` under `new_parent` (or to the root list) at `index`,
    /// appending when `index` is `None` or past the end.
    pub fn move_node(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id));
        }
        if let Some(target) = new_parent {
            if !self.contains(target) {
                return Err(TreeError::UnknownNode(target));
            }
            if target == id || self.is_ancestor(id, target) {
                return Err(TreeError::Cycle { node: id, target });
            }
        }

        self.unlink(id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = new_parent;
        }
        self.link(id, new_parent, index);
        Ok(())
    }

    /// True when `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// All node ids in pre-order, roots in order
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Move every node of `other` into this tree under fresh ids, appending
    /// its roots after the existing ones. Returns the new root ids.
    pub fn append(&mut self, other: ElementTree) -> Vec<NodeId> {
        let ElementTree {
            mut nodes, roots, ..
        } = other;

        let new_roots: Vec<NodeId> = roots
            .into_iter()
            .filter_map(|root| self.adopt(&mut nodes, root, None))
            .collect();
        self.roots.extend(new_roots.iter().copied());
        new_roots
    }

    /// Replace all content with `other`, keeping this tree's default table
    pub fn replace_with(&mut self, other: ElementTree) {
        self.nodes = other.nodes;
        self.roots = other.roots;
        self.next_id = other.next_id;
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn adopt(
        &mut self,
        source: &mut HashMap<NodeId, Node>,
        old: NodeId,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        let mut node = source.remove(&old)?;
        let id = self.allocate_id();
        let old_children = std::mem::take(&mut node.children);
        node.id = id;
        node.parent = parent;
        self.nodes.insert(id, node);

        let children: Vec<NodeId> = old_children
            .into_iter()
            .filter_map(|child| self.adopt(source, child, Some(id)))
            .collect();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = children;
        }
        Some(id)
    }

    fn link(&mut self, id: NodeId, parent: Option<NodeId>, index: Option<usize>) {
        let list = match parent {
            Some(p) => match self.nodes.get_mut(&p) {
                Some(node) => &mut node.children,
                None => return,
            },
            None => &mut self.roots,
        };
        let at = index.unwrap_or(list.len()).min(list.len());
        list.insert(at, id);
    }

    fn unlink(&mut self, id: NodeId) {
        match self.parent(id) {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(&p) {
                    node.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
    }
}

/// Flat serialized form: root ids plus every node in pre-order
#[derive(Serialize, Deserialize)]
struct TreeSnapshot {
    roots: Vec<NodeId>,
    nodes: Vec<Node>,
}

impl From<ElementTree> for TreeSnapshot {
    fn from(mut tree: ElementTree) -> Self {
        let nodes = tree
            .depth_first()
            .into_iter()
            .filter_map(|id| tree.nodes.remove(&id))
            .collect();
        TreeSnapshot {
            roots: tree.roots,
            nodes,
        }
    }
}

impl TryFrom<TreeSnapshot> for ElementTree {
    type Error = TreeError;

    fn try_from(snapshot: TreeSnapshot) -> Result<Self, Self::Error> {
        let invalid = |msg: String| TreeError::InvalidSnapshot(msg);

        let mut nodes = HashMap::with_capacity(snapshot.nodes.len());
        for node in snapshot.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                return Err(invalid(format!("duplicate id {}", id)));
            }
        }

        for root in &snapshot.roots {
            match nodes.get(root) {
                None => return Err(invalid(format!("root {} is not a node", root))),
                Some(node) if node.parent.is_some() => {
                    return Err(invalid(format!("root {} has a parent", root)))
                }
                Some(_) => {}
            }
        }

        for node in nodes.values() {
            for child in &node.children {
                match nodes.get(child) {
                    Some(c) if c.parent == Some(node.id) => {}
                    Some(_) => {
                        return Err(invalid(format!(
                            "{} lists {} as a child but the child disagrees",
                            node.id, child
                        )))
                    }
                    None => {
                        return Err(invalid(format!("{} lists unknown child {}", node.id, child)))
                    }
                }
            }
        }

        // Every node must be reached exactly once from the roots
        let mut seen = HashSet::with_capacity(nodes.len());
        let mut stack: Vec<NodeId> = snapshot.roots.clone();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(invalid(format!("{} is reachable more than once", id)));
            }
            if let Some(node) = nodes.get(&id) {
                stack.extend(node.children.iter().copied());
            }
        }
        if seen.len() != nodes.len() {
            return Err(invalid(format!(
                "{} nodes are not reachable from the roots",
                nodes.len() - seen.len()
            )));
        }

        let next_id = nodes.keys().map(|id| id.0).max().unwrap_or(0) + 1;
        Ok(ElementTree {
            nodes,
            roots: snapshot.roots,
            next_id,
            defaults: NodeDefaults::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ElementTree, NodeId, NodeId, NodeId) {
        let mut tree = ElementTree::new();
        let panel = tree.create(ElementKind::Container, None).unwrap();
        let title = tree.create(ElementKind::Text, Some(panel)).unwrap();
        let button = tree.create(ElementKind::Button, Some(panel)).unwrap();
        (tree, panel, title, button)
    }

    #[test]
    fn test_create_links_parent_and_child() {
        let (tree, panel, title, button) = sample();
        assert_eq!(tree.roots(), &[panel]);
        assert_eq!(tree.children(panel), &[title, button]);
        assert_eq!(tree.parent(title), Some(panel));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_create_under_unknown_parent() {
        let mut tree = ElementTree::new();
        let err = tree.create(ElementKind::Text, Some(NodeId(99))).unwrap_err();
        assert_eq!(err, TreeError::UnknownNode(NodeId(99)));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let (mut tree, panel, title, _) = sample();
        let removed = tree.remove(panel).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(removed[0].id, panel);
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
        assert!(!tree.contains(title));
    }

    #[test]
    fn test_remove_child_detaches_from_parent() {
        let (mut tree, panel, title, button) = sample();
        tree.remove(title).unwrap();
        assert_eq!(tree.children(panel), &[button]);
    }

    #[test]
    fn test_move_rejects_cycles() {
        let (mut tree, panel, title, _) = sample();
        let err = tree.move_node(panel, Some(title), None).unwrap_err();
        assert_eq!(
            err,
            TreeError::Cycle {
                node: panel,
                target: title
            }
        );
        assert!(tree.move_node(panel, Some(panel), None).is_err());
    }

    #[test]
    fn test_move_to_root_at_index() {
        let (mut tree, panel, title, button) = sample();
        tree.move_node(button, None, Some(0)).unwrap();
        assert_eq!(tree.roots(), &[button, panel]);
        assert_eq!(tree.children(panel), &[title]);
        assert_eq!(tree.parent(button), None);
    }

    #[test]
    fn test_depth_first_order() {
        let (mut tree, panel, title, button) = sample();
        let inner = tree.create(ElementKind::Image, Some(title)).unwrap();
        let second = tree.create(ElementKind::Container, None).unwrap();
        assert_eq!(tree.depth_first(), vec![panel, title, inner, button, second]);
    }

    #[test]
    fn test_append_assigns_fresh_ids() {
        let (mut tree, panel, _, _) = sample();
        let (other, _, _, _) = sample();
        let new_roots = tree.append(other);
        assert_eq!(new_roots.len(), 1);
        assert_ne!(new_roots[0], panel);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.roots(), &[panel, new_roots[0]]);
        let children = tree.children(new_roots[0]).to_vec();
        assert_eq!(children.len(), 2);
        for child in children {
            assert_eq!(tree.parent(child), Some(new_roots[0]));
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (tree, panel, title, _) = sample();
        let json = serde_json::to_string(&tree).unwrap();
        let restored: ElementTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.roots(), &[panel]);
        assert_eq!(restored.parent(title), Some(panel));
        assert_eq!(restored, tree);
    }

    #[test]
    fn test_snapshot_rejects_orphans() {
        let (tree, ..) = sample();
        let mut value = serde_json::to_value(&tree).unwrap();
        value["roots"] = serde_json::json!([]);
        let result: Result<ElementTree, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
