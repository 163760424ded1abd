//! Tree flattening: numbers every statement of a proof tree in pre-order and links
//! the resulting nodes.
//!
//! A branch's own statements take the identifiers `start..start + len`; its child
//! subtrees follow in declared order. The first statement of a branch hangs off the
//! last statement of its parent branch, and that last statement fans out to the first
//! statement of every non-empty child branch.

use std::collections::BTreeMap;
use std::mem;

use tracing::{debug, instrument, trace};

use crate::domain::address::resolve;
use crate::domain::antecedent::{index_antecedents, ProducerMap};
use crate::domain::entities::{Branch, Reference};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::graph::{Children, FlatGraph, Node, NodeId};

/// Output of a flattening pass before antecedents are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    /// Nodes ordered by identifier, `antecedent` still unset
    pub nodes: Vec<Node>,
    /// Referenced node -> node whose decomposition references it
    pub producers: ProducerMap,
}

impl Flattened {
    /// Applies the producer map and validates the node links.
    pub fn into_graph(self) -> DomainResult<FlatGraph> {
        let Flattened {
            mut nodes,
            producers,
        } = self;
        index_antecedents(&mut nodes, &producers);
        FlatGraph::from_nodes(nodes)
    }
}

/// State owned by a single pass: the node table and the forward reference map.
#[derive(Debug, Default)]
struct FlattenContext {
    nodes: BTreeMap<NodeId, Node>,
    producers: ProducerMap,
}

/// Flattens a proof tree into nodes.
#[derive(Debug, Clone, Copy)]
pub struct Flattener<'t> {
    root: &'t Branch,
    strict: bool,
}

impl<'t> Flattener<'t> {
    pub fn new(root: &'t Branch) -> Self {
        Self {
            root,
            strict: false,
        }
    }

    /// Reject references that resolve to a node after the referencing statement.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[instrument(level = "debug", skip(self), fields(strict = self.strict))]
    pub fn flatten(&self) -> DomainResult<Flattened> {
        ensure_no_hollow_branches(self.root, &mut Vec::new())?;

        let mut ctx = FlattenContext::default();
        let count = self.flatten_branch(&mut ctx, self.root, 0, None)?;
        debug!(count, references = ctx.producers.len(), "flattened");

        Ok(Flattened {
            nodes: ctx.nodes.into_values().collect(),
            producers: ctx.producers,
        })
    }

    /// Returns the number of nodes taken by `branch` and its descendants.
    fn flatten_branch(
        &self,
        ctx: &mut FlattenContext,
        branch: &Branch,
        start: NodeId,
        parent: Option<NodeId>,
    ) -> DomainResult<usize> {
        let own = branch.statements.len();
        if own == 0 {
            return Ok(0);
        }
        let last = start + own - 1;

        let mut consumed = own;
        let mut fan_out = Vec::with_capacity(branch.children.len());
        for child in &branch.children {
            let child_start = start + consumed;
            let used = self.flatten_branch(ctx, child, child_start, Some(last))?;
            if used > 0 {
                fan_out.push(child_start);
            }
            consumed += used;
        }

        for (offset, statement) in branch.statements.iter().enumerate() {
            let id = start + offset;
            let decomposition = statement
                .references
                .iter()
                .map(|reference| self.resolve_from(id, reference))
                .collect::<DomainResult<Vec<_>>>()?;

            if !statement.is_terminator() {
                for &target in &decomposition {
                    ctx.producers.record(target, id);
                }
            }

            let children = if id == last {
                Children::Fork(mem::take(&mut fan_out))
            } else {
                Children::Next(id + 1)
            };
            trace!(id, text = %statement.text, ?children, "node");

            ctx.nodes.insert(
                id,
                Node {
                    id,
                    text: statement.text.clone(),
                    premise: statement.premise,
                    parent: if offset == 0 { parent } else { Some(id - 1) },
                    children,
                    decomposition,
                    antecedent: None,
                },
            );
        }

        Ok(consumed)
    }

    fn resolve_from(&self, from: NodeId, reference: &Reference) -> DomainResult<NodeId> {
        let target = resolve(self.root, reference)?;
        if self.strict && target > from {
            return Err(DomainError::ForwardReference {
                from,
                reference: reference.clone(),
                target,
            });
        }
        Ok(target)
    }
}

/// An empty branch is skipped by the flattener, so nothing may hang below it.
fn ensure_no_hollow_branches(branch: &Branch, path: &mut Vec<usize>) -> DomainResult<()> {
    if branch.is_hollow() {
        let size = branch.size();
        if size > 0 {
            return Err(DomainError::HollowBranch {
                path: path.clone(),
                size,
            });
        }
        return Ok(());
    }
    for (index, child) in branch.children.iter().enumerate() {
        path.push(index);
        ensure_no_hollow_branches(child, path)?;
        path.pop();
    }
    Ok(())
}

/// Flattens `root` and applies antecedents in one go.
pub fn flatten(root: &Branch) -> DomainResult<FlatGraph> {
    Flattener::new(root).flatten()?.into_graph()
}
