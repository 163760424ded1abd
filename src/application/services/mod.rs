//! Application services
//!
//! Concrete services that orchestrate the domain translation.
//! Services depend on the I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod convert;

pub use convert::{ConversionReport, ConversionService, ProofSummary};
