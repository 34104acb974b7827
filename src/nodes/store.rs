//! Keyed node storage

use indexmap::IndexMap;

use super::Node;
use crate::error::{Error, Result};

/// What a `create_node` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeChange {
    Created,
    Updated,
    Unchanged,
}

/// Storage the content lifecycle writes into
pub trait NodeStore {
    /// Create a node, or replace the node with the same id. Child links of a
    /// replaced node are kept.
    fn create_node(&mut self, node: Node) -> NodeChange;

    fn get_node(&self, id: &str) -> Option<&Node>;

    /// Record `child` under `parent.children`
    fn create_parent_child_link(&mut self, parent: &str, child: &str) -> Result<()>;

    /// All nodes in insertion order
    fn nodes(&self) -> Vec<&Node>;

    fn nodes_by_type(&self, type_name: &str) -> Vec<&Node> {
        self.nodes()
            .into_iter()
            .filter(|n| n.type_name() == type_name)
            .collect()
    }
}

/// In-memory [`NodeStore`] keyed by node id
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    nodes: IndexMap<String, Node>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodeStore for MemoryStore {
    fn create_node(&mut self, mut node: Node) -> NodeChange {
        match self.nodes.get_mut(&node.id) {
            Some(existing) if existing.internal.content_digest == node.internal.content_digest => {
                tracing::trace!("Node {} unchanged", node.id);
                NodeChange::Unchanged
            }
            Some(existing) => {
                tracing::debug!("Replacing {} node {}", node.type_name(), node.id);
                for child in std::mem::take(&mut existing.children) {
                    if !node.children.contains(&child) {
                        node.children.push(child);
                    }
                }
                *existing = node;
                NodeChange::Updated
            }
            None => {
                tracing::debug!("Creating {} node {}", node.type_name(), node.id);
                self.nodes.insert(node.id.clone(), node);
                NodeChange::Created
            }
        }
    }

    fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn create_parent_child_link(&mut self, parent: &str, child: &str) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child.to_string()));
        }
        let parent_node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| Error::NodeNotFound(parent.to_string()))?;
        if !parent_node.children.iter().any(|c| c == child) {
            parent_node.children.push(child.to_string());
        }
        Ok(())
    }

    fn nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(id: &str, title: &str) -> Node {
        Node::new(id, "MdxPost", "", None, json!({ "title": title }))
    }

    #[test]
    fn test_create_or_replace() {
        let mut store = MemoryStore::new();
        assert_eq!(store.create_node(node("a", "One")), NodeChange::Created);
        assert_eq!(store.create_node(node("a", "One")), NodeChange::Unchanged);
        assert_eq!(store.create_node(node("a", "Two")), NodeChange::Updated);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_node("a").unwrap().get_str("title"), Some("Two"));
    }

    #[test]
    fn test_parent_child_link() {
        let mut store = MemoryStore::new();
        store.create_node(node("parent", "P"));
        store.create_node(node("child", "C"));
        store.create_parent_child_link("parent", "child").unwrap();
        store.create_parent_child_link("parent", "child").unwrap();
        assert_eq!(store.get_node("parent").unwrap().children, vec!["child"]);

        // replacing the parent keeps its children
        store.create_node(node("parent", "P2"));
        assert_eq!(store.get_node("parent").unwrap().children, vec!["child"]);
    }

    #[test]
    fn test_link_to_missing_node_fails() {
        let mut store = MemoryStore::new();
        store.create_node(node("parent", "P"));
        let err = store.create_parent_child_link("parent", "nope").unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(id) if id == "nope"));
        let err = store.create_parent_child_link("nope", "parent").unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(_)));
    }

    #[test]
    fn test_nodes_by_type_keeps_insertion_order() {
        let mut store = MemoryStore::new();
        store.create_node(node("b", "B"));
        store.create_node(Node::new("c", "Category", "", None, json!({"name": "x"})));
        store.create_node(node("a", "A"));
        let ids: Vec<_> = store
            .nodes_by_type("MdxPost")
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
