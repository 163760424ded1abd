//! Flat node graph produced from a proof tree.

use std::slice;

use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Dense, zero-based node identifier in pre-order.
pub type NodeId = usize;

/// Structural successors of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    /// Next statement in the same branch.
    Next(NodeId),
    /// First statement of each sub-branch; empty when the branch ends without forking.
    Fork(Vec<NodeId>),
}

impl Children {
    pub fn as_slice(&self) -> &[NodeId] {
        match self {
            Children::Next(id) => slice::from_ref(id),
            Children::Fork(ids) => ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// True for the last statement of a branch.
    pub fn ends_branch(&self) -> bool {
        matches!(self, Children::Fork(_))
    }
}

/// One statement of the proof, linked into the flat graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    pub premise: bool,
    /// None only for the first statement of the root branch
    pub parent: Option<NodeId>,
    pub children: Children,
    /// Absolute identifiers of the statements this one references
    pub decomposition: Vec<NodeId>,
    /// Node whose decomposition produced this one
    pub antecedent: Option<NodeId>,
}

/// All nodes of a flattened proof, stored at the index of their identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatGraph {
    nodes: Vec<Node>,
}

impl FlatGraph {
    /// Builds a graph from nodes in any order.
    ///
    /// Identifiers must be exactly `0..nodes.len()`, and every link must point at an
    /// existing node.
    #[instrument(level = "debug", skip(nodes), fields(count = nodes.len()))]
    pub fn from_nodes(mut nodes: Vec<Node>) -> DomainResult<Self> {
        nodes.sort_by_key(|n| n.id);
        for (expected, node) in nodes.iter().enumerate() {
            if node.id != expected {
                return Err(DomainError::MalformedGraph(format!(
                    "identifiers are not dense: expected {}, found {}",
                    expected, node.id
                )));
            }
        }

        let len = nodes.len();
        for node in &nodes {
            let dangling = node
                .parent
                .iter()
                .chain(node.children.as_slice())
                .chain(&node.decomposition)
                .chain(node.antecedent.iter())
                .find(|&&id| id >= len);
            if let Some(id) = dangling {
                return Err(DomainError::MalformedGraph(format!(
                    "node {} links to missing node {}",
                    node.id, id
                )));
            }
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first statement of the root branch.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.parent.is_none()).map(|n| n.id)
    }

    /// Nodes that end a branch without forking.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|n| n.children.ends_branch() && n.children.is_empty())
    }

    /// Number of nodes that have an antecedent.
    pub fn antecedent_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.antecedent.is_some()).count()
    }

    /// Walks the graph from the root following child links.
    pub fn iter_preorder(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }
}

pub struct PreOrderIterator<'a> {
    graph: &'a FlatGraph,
    stack: Vec<NodeId>,
    seen: Vec<bool>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(graph: &'a FlatGraph) -> Self {
        let stack = graph.root().into_iter().collect();
        Self {
            graph,
            stack,
            seen: vec![false; graph.len()],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current = self.stack.pop()?;
        // A node reached twice means the links are not a tree; visit it once
        while std::mem::replace(&mut self.seen[current], true) {
            current = self.stack.pop()?;
        }
        let node = self.graph.get(current)?;
        // Reverse so the first sub-branch is visited first
        self.stack
            .extend(node.children.as_slice().iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, parent: Option<NodeId>, children: Children) -> Node {
        Node {
            id,
            text: format!("s{}", id),
            premise: false,
            parent,
            children,
            decomposition: Vec::new(),
            antecedent: None,
        }
    }

    fn forked() -> FlatGraph {
        FlatGraph::from_nodes(vec![
            node(3, Some(1), Children::Fork(vec![])),
            node(0, None, Children::Next(1)),
            node(2, Some(1), Children::Fork(vec![])),
            node(1, Some(0), Children::Fork(vec![2, 3])),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_nodes_sorts_by_id() {
        let graph = forked();
        let ids: Vec<_> = graph.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(graph.root(), Some(0));
    }

    #[test]
    fn test_from_nodes_rejects_gaps() {
        let result = FlatGraph::from_nodes(vec![
            node(0, None, Children::Next(2)),
            node(2, Some(0), Children::Fork(vec![])),
        ]);
        assert!(matches!(result, Err(DomainError::MalformedGraph(_))));
    }

    #[test]
    fn test_from_nodes_rejects_dangling_links() {
        let result = FlatGraph::from_nodes(vec![node(0, None, Children::Next(1))]);
        assert!(matches!(result, Err(DomainError::MalformedGraph(_))));
    }

    #[test]
    fn test_preorder_and_leaves() {
        let graph = forked();
        let order: Vec<_> = graph.iter_preorder().map(|n| n.id).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        let leaves: Vec<_> = graph.leaves().map(|n| n.id).collect();
        assert_eq!(leaves, vec![2, 3]);
    }
}
