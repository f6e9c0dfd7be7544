//! Storage abstractions and implementations.
//!
//! The repository traits are the boundary the request handlers talk to;
//! [`MemoryLrs`] is the in-process reference implementation backing the
//! server binary and the integration tests.

mod error;
mod memory;
mod traits;

pub use error::{LrsError, Result};
pub use memory::MemoryLrs;
pub use traits::{ActivityRepository, StatementRepository};

#[cfg(test)]
pub use traits::{MockActivityRepository, MockStatementRepository};
