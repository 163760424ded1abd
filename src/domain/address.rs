//! Reference resolution: symbolic branch path + offset to absolute node identifier.
//!
//! Identifiers follow the flattener's numbering: a branch's own statements come
//! first, then each child subtree in declared order. So the identifier of a
//! statement is the sum, along its path, of each ancestor's statement count plus
//! the sizes of the siblings skipped over, plus the final offset.

use tracing::{instrument, trace};

use crate::domain::entities::{Branch, Reference};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::graph::NodeId;

/// Resolves `reference` against the tree rooted at `root`.
#[instrument(level = "trace", skip_all, fields(reference = %reference))]
pub fn resolve(root: &Branch, reference: &Reference) -> DomainResult<NodeId> {
    let mut branch = root;
    let mut base = 0;

    for (depth, &index) in reference.branches.iter().enumerate() {
        let Some(selected) = branch.children.get(index) else {
            return Err(DomainError::ReferenceOutOfBounds {
                reference: reference.clone(),
                depth,
                index,
                available: branch.children.len(),
            });
        };
        base += branch.statements.len();
        base += branch.children[..index]
            .iter()
            .map(Branch::size)
            .sum::<usize>();
        branch = selected;
    }

    if reference.offset >= branch.statements.len() {
        return Err(DomainError::OffsetOutOfBounds {
            reference: reference.clone(),
            len: branch.statements.len(),
        });
    }

    let id = base + reference.offset;
    trace!(id, "resolved");
    Ok(id)
}
