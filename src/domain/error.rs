//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::Reference;
use crate::domain::graph::NodeId;

/// Domain errors describe proof trees or graphs that violate their shape invariants.
/// These are independent of how the tree was read or where the graph is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("reference {reference} selects branch {index} at depth {depth}, but only {available} child branches exist")]
    ReferenceOutOfBounds {
        reference: Reference,
        depth: usize,
        index: usize,
        available: usize,
    },

    #[error("reference {reference} points past the end of a branch with {len} statements")]
    OffsetOutOfBounds { reference: Reference, len: usize },

    #[error("statement {from} references {reference}, which resolves forward to node {target}")]
    ForwardReference {
        from: NodeId,
        reference: Reference,
        target: NodeId,
    },

    #[error("branch {path:?} has no statements but its descendants hold {size}")]
    HollowBranch { path: Vec<usize>, size: usize },

    #[error("malformed node graph: {0}")]
    MalformedGraph(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
