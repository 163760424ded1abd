//! Application layer: file formats, record assembly, and the conversion service
//!
//! This layer drives the domain pass and depends on I/O boundary traits.

pub mod codec;
pub mod error;
pub mod error_ext;
pub mod records;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use records::{assemble, graph_from_records, YewRecord};
