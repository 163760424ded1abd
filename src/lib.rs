//! Flattens branching truth-tree proofs into indexed node graphs.
//!
//! A willow proof is a tree of branches, each holding an ordered run of statements
//! that reference one another by branch path and offset. The yew format lists every
//! statement as a node with a dense identifier, parent and child links, the
//! identifiers it decomposes into, and the node it was produced by.
//!
//! ```
//! use willow2yew::domain::{flatten, Branch, Children, Reference, Statement};
//!
//! let tree = Branch::new(
//!     vec![Statement::premise("P ∨ Q"), Statement::premise("¬P")],
//!     vec![
//!         Branch::leaf(vec![Statement::new("P").with_references(vec![Reference::root(0)])]),
//!         Branch::leaf(vec![Statement::new("Q")]),
//!     ],
//! );
//! let graph = flatten(&tree).unwrap();
//!
//! assert_eq!(graph.len(), 4);
//! assert_eq!(graph.nodes()[1].children, Children::Fork(vec![2, 3]));
//! assert_eq!(graph.nodes()[0].antecedent, Some(2));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
