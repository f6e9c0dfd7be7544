//! xAPI Learning Record Store query/response surface.
//!
//! Implements the statement and activity read/write endpoints of an xAPI
//! 1.0.3 LRS: parameter-combination validation, filter building, response
//! assembly and multipart attachment encoding.
//!
//! ## Modules
//!
//! - [`domain`] - xAPI data model (statements, agents, activities, attachments)
//! - [`infra`] - repository traits and the in-memory store
//! - [`serializer`] - xAPI JSON boundary
//! - [`api`] - query validation, response assembly, multipart encoding, handlers
//! - [`server`] - configuration, router and bootstrap

pub mod api;
pub mod domain;
pub mod infra;
pub mod serializer;
pub mod server;

pub use api::{ApiError, ATTACHMENT_HASH_HEADER, CONSISTENT_THROUGH_HEADER, VERSION_HEADER};
pub use domain::{
    Activity, Agent, Attachment, Iri, SortOrder, Statement, StatementId, StatementResult,
    StatementsFilter,
};
pub use infra::{ActivityRepository, LrsError, MemoryLrs, StatementRepository};
