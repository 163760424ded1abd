//! Rebuilds a branch tree from a flat node graph.
//!
//! Branch boundaries come from the child links: a run of `Next` links is one branch,
//! a `Fork` ends it. Decomposition identifiers are turned back into branch-path
//! references, so flattening the result reproduces the graph's identifiers.

use tracing::instrument;

use crate::domain::entities::{Branch, Reference, Statement};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::graph::{Children, FlatGraph, NodeId};

/// Node identifiers of one branch and its sub-branches.
struct Skeleton {
    ids: Vec<NodeId>,
    children: Vec<Skeleton>,
}

struct Unflattener<'g> {
    graph: &'g FlatGraph,
    /// Where each node ended up in the rebuilt tree
    locations: Vec<Option<Reference>>,
}

impl<'g> Unflattener<'g> {
    fn layout(
        &mut self,
        first: NodeId,
        parent: Option<NodeId>,
        path: &mut Vec<usize>,
    ) -> DomainResult<Skeleton> {
        let graph = self.graph;
        let mut ids = Vec::new();
        let mut current = first;
        let mut expected_parent = parent;

        loop {
            let node = graph.get(current).ok_or_else(|| {
                DomainError::MalformedGraph(format!("missing node {}", current))
            })?;
            if node.parent != expected_parent {
                return Err(DomainError::MalformedGraph(format!(
                    "node {} has parent {:?}, but is linked from {:?}",
                    current, node.parent, expected_parent
                )));
            }
            if self.locations[current].is_some() {
                return Err(DomainError::MalformedGraph(format!(
                    "node {} is reached twice",
                    current
                )));
            }
            self.locations[current] = Some(Reference::new(path.clone(), ids.len()));
            ids.push(current);

            match &node.children {
                Children::Next(next) => {
                    expected_parent = Some(current);
                    current = *next;
                }
                Children::Fork(firsts) => {
                    let mut children = Vec::with_capacity(firsts.len());
                    for (index, &child) in firsts.iter().enumerate() {
                        path.push(index);
                        children.push(self.layout(child, Some(current), path)?);
                        path.pop();
                    }
                    return Ok(Skeleton { ids, children });
                }
            }
        }
    }

    fn build(&self, skeleton: &Skeleton) -> DomainResult<Branch> {
        let statements = skeleton
            .ids
            .iter()
            .map(|&id| self.statement(id))
            .collect::<DomainResult<Vec<_>>>()?;
        let children = skeleton
            .children
            .iter()
            .map(|child| self.build(child))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Branch::new(statements, children))
    }

    fn statement(&self, id: NodeId) -> DomainResult<Statement> {
        let node = &self.graph.nodes()[id];
        let references = node
            .decomposition
            .iter()
            .map(|&target| {
                self.locations
                    .get(target)
                    .cloned()
                    .flatten()
                    .ok_or_else(|| {
                        DomainError::MalformedGraph(format!(
                            "node {} references unplaced node {}",
                            id, target
                        ))
                    })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Statement {
            text: node.text.clone(),
            premise: node.premise,
            references,
        })
    }
}

/// Rebuilds the proof tree described by `graph`.
///
/// Every node must be reachable from the single root, and every parent link must
/// agree with the child links.
#[instrument(level = "debug", skip(graph), fields(count = graph.len()))]
pub fn unflatten(graph: &FlatGraph) -> DomainResult<Branch> {
    let Some(root) = graph.root() else {
        if graph.is_empty() {
            return Ok(Branch::default());
        }
        return Err(DomainError::MalformedGraph(
            "no node without a parent".to_string(),
        ));
    };

    let mut unflattener = Unflattener {
        graph,
        locations: vec![None; graph.len()],
    };
    let skeleton = unflattener.layout(root, None, &mut Vec::new())?;

    if let Some(orphan) = unflattener.locations.iter().position(Option::is_none) {
        return Err(DomainError::MalformedGraph(format!(
            "node {} is not reachable from the root",
            orphan
        )));
    }
    unflattener.build(&skeleton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flatten::flatten;

    #[test]
    fn test_rebuilds_branches_and_references() {
        let tree = Branch::new(
            vec![Statement::premise("P ∨ Q"), Statement::premise("¬P")],
            vec![
                Branch::leaf(vec![
                    Statement::new("P").with_references(vec![Reference::root(0)]),
                    Statement::new("×").with_references(vec![
                        Reference::new(vec![0], 0),
                        Reference::root(1),
                    ]),
                ]),
                Branch::leaf(vec![Statement::new("Q")]),
            ],
        );

        let rebuilt = unflatten(&flatten(&tree).unwrap()).unwrap();

        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn test_empty_graph_is_empty_tree() {
        assert_eq!(unflatten(&FlatGraph::default()).unwrap(), Branch::default());
    }
}
