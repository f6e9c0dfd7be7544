//! Core xAPI domain types.
//!
//! Statements, actors, verbs, activities and attachments as defined by the
//! Experience API 1.0.3 data model, plus the [`StatementsFilter`] criteria
//! value used for collection lookups.

mod activity;
mod actor;
mod attachment;
mod filter;
mod iri;
mod statement;

pub use activity::{Activity, ActivityDefinition};
pub use actor::{Account, Agent};
pub use attachment::Attachment;
pub use filter::{SortOrder, StatementsFilter};
pub use iri::{InvalidIri, Iri};
pub use statement::{
    Context, ContextActivities, InvalidStatementId, Statement, StatementId, StatementObject,
    StatementRef, StatementResult, Verb, VOIDING_VERB,
};
