//! Re-deriving the tree from a flat graph and flattening it again must reproduce
//! the same numbering.

use std::path::Path;

use willow2yew::application::codec::{decode_yew, encode_yew};
use willow2yew::application::{assemble, graph_from_records};
use willow2yew::domain::{
    flatten, unflatten, Branch, Children, DomainError, FlatGraph, Node, Reference, Statement,
    CLOSED_TERMINATOR,
};

fn proof() -> Branch {
    Branch::new(
        vec![
            Statement::premise("P → Q").with_references(vec![
                Reference::new(vec![0], 0),
                Reference::new(vec![1], 0),
            ]),
            Statement::premise("P"),
            Statement::premise("¬Q"),
        ],
        vec![
            Branch::leaf(vec![
                Statement::new("¬P"),
                Statement::new(CLOSED_TERMINATOR)
                    .with_references(vec![Reference::new(vec![0], 0), Reference::root(1)]),
            ]),
            Branch::leaf(vec![
                Statement::new("Q"),
                Statement::new(CLOSED_TERMINATOR)
                    .with_references(vec![Reference::new(vec![1], 0), Reference::root(2)]),
            ]),
        ],
    )
}

fn ids_and_links(graph: &FlatGraph) -> Vec<(usize, Option<usize>, Vec<usize>, Vec<usize>)> {
    graph
        .nodes()
        .iter()
        .map(|n| {
            (
                n.id,
                n.parent,
                n.children.as_slice().to_vec(),
                n.decomposition.clone(),
            )
        })
        .collect()
}

#[test]
fn given_flattened_proof_when_unflattening_then_rebuilds_original_tree() {
    // Arrange
    let tree = proof();
    let graph = flatten(&tree).unwrap();

    // Act
    let rebuilt = unflatten(&graph).unwrap();

    // Assert
    assert_eq!(rebuilt, tree);
    assert_eq!(flatten(&rebuilt).unwrap(), graph);
}

#[test]
fn given_yew_json_when_reading_back_then_reflattening_reproduces_numbering() {
    // Arrange
    let graph = flatten(&proof()).unwrap();
    let json = encode_yew(&assemble(&graph), 4).unwrap();

    // Act
    let records = decode_yew(&json, Path::new("proof.yew")).unwrap();
    let read_back = graph_from_records(records).unwrap();
    let reflattened = flatten(&unflatten(&read_back).unwrap()).unwrap();

    // Assert
    assert_eq!(read_back, graph);
    assert_eq!(ids_and_links(&reflattened), ids_and_links(&graph));
}

#[test]
fn given_single_sub_branch_when_reading_back_then_numbering_survives_merge() {
    // Arrange: a branch with exactly one sub-branch looks like one longer branch in yew
    let tree = Branch::new(
        vec![Statement::premise("¬¬P")],
        vec![Branch::leaf(vec![
            Statement::new("P").with_references(vec![Reference::root(0)])
        ])],
    );
    let graph = flatten(&tree).unwrap();
    let json = encode_yew(&assemble(&graph), 0).unwrap();

    // Act
    let read_back =
        graph_from_records(decode_yew(&json, Path::new("dn.yew")).unwrap()).unwrap();
    let rebuilt = unflatten(&read_back).unwrap();

    // Assert
    assert_eq!(read_back.nodes()[0].children, Children::Next(1));
    assert_eq!(rebuilt.branch_count(), 1);
    assert_eq!(ids_and_links(&flatten(&rebuilt).unwrap()), ids_and_links(&graph));
}

#[test]
fn given_unreachable_node_when_unflattening_then_fails() {
    // Arrange
    let node = |id: usize, parent: Option<usize>, children: Children| Node {
        id,
        text: format!("s{}", id),
        premise: false,
        parent,
        children,
        decomposition: Vec::new(),
        antecedent: None,
    };
    let graph = FlatGraph::from_nodes(vec![
        node(0, None, Children::Fork(vec![1])),
        node(1, Some(0), Children::Fork(vec![])),
        node(2, Some(1), Children::Fork(vec![])),
    ])
    .unwrap();

    // Act
    let result = unflatten(&graph);

    // Assert
    assert!(matches!(result, Err(DomainError::MalformedGraph(_))));
}
