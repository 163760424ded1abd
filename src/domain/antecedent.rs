//! Reverse index from referenced nodes to the node whose decomposition produced them.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::domain::graph::{Node, NodeId};

/// Forward reference map collected while flattening: referenced node -> producing node.
///
/// A later registration for the same target replaces the earlier one, so a node
/// referenced by several statements keeps only the last producer seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerMap {
    entries: BTreeMap<NodeId, NodeId>,
}

impl ProducerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, target: NodeId, producer: NodeId) {
        if let Some(previous) = self.entries.insert(target, producer) {
            if previous != producer {
                debug!(target, previous, producer, "antecedent overwritten");
            }
        }
    }

    pub fn get(&self, target: NodeId) -> Option<NodeId> {
        self.entries.get(&target).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.entries.iter().map(|(&t, &p)| (t, p))
    }
}

/// Fills each node's `antecedent` from `producers`. `nodes` must be ordered by identifier.
///
/// Nodes that were never referenced keep `None`.
pub fn index_antecedents(nodes: &mut [Node], producers: &ProducerMap) {
    for (target, producer) in producers.iter() {
        if let Some(node) = nodes.get_mut(target) {
            trace!(target, producer, "antecedent");
            node.antecedent = Some(producer);
        }
    }
}
