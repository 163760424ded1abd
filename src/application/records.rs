//! Yew node records: the serialized form of a flat graph.

use serde::{Deserialize, Serialize};

use crate::domain::{Children, DomainResult, FlatGraph, Node, NodeId};

/// One entry of a yew file.
///
/// `children` is always a list, also when it holds just the next statement.
/// `premise` is written only when true; `parent` and `antecedent` only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YewRecord {
    pub id: NodeId,
    pub text: String,
    pub children: Vec<NodeId>,
    pub decomposition: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub premise: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antecedent: Option<NodeId>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<&Node> for YewRecord {
    fn from(node: &Node) -> Self {
        YewRecord {
            id: node.id,
            text: node.text.clone(),
            children: node.children.as_slice().to_vec(),
            decomposition: node.decomposition.clone(),
            premise: node.premise,
            parent: node.parent,
            antecedent: node.antecedent,
        }
    }
}

impl From<YewRecord> for Node {
    /// A single child `id + 1` reads back as the next statement of the same branch:
    /// a branch with exactly one sub-branch is indistinguishable from one longer branch.
    fn from(record: YewRecord) -> Self {
        let children = match record.children.as_slice() {
            [next] if *next == record.id + 1 => Children::Next(*next),
            _ => Children::Fork(record.children),
        };
        Node {
            id: record.id,
            text: record.text,
            premise: record.premise,
            parent: record.parent,
            children,
            decomposition: record.decomposition,
            antecedent: record.antecedent,
        }
    }
}

/// Records in identifier order, ready to serialize.
pub fn assemble(graph: &FlatGraph) -> Vec<YewRecord> {
    graph.nodes().iter().map(YewRecord::from).collect()
}

/// Reads records back into a validated graph.
pub fn graph_from_records(records: Vec<YewRecord>) -> DomainResult<FlatGraph> {
    FlatGraph::from_nodes(records.into_iter().map(Node::from).collect())
}
