//! Domain layer: proof trees, flat node graphs, and the translation between them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod address;
pub mod antecedent;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod graph;
pub mod unflatten;

pub use address::resolve;
pub use antecedent::{index_antecedents, ProducerMap};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use flatten::{flatten, Flattened, Flattener};
pub use graph::{Children, FlatGraph, Node, NodeId};
pub use unflatten::unflatten;
