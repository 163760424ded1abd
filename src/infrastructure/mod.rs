//! Infrastructure layer: filesystem access and service wiring
//!
//! Real I/O lives behind the traits here so services can be exercised in tests.

pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
