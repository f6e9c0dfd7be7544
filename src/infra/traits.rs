//! Trait definitions for the LRS storage boundary.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::{Activity, Iri, Statement, StatementId, StatementsFilter};

use super::Result;

/// Statement storage.
///
/// "Not found" is an expected outcome on every read path and is expressed
/// as `Ok(None)`, never as an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatementRepository: Send + Sync {
    /// Look up a statement by id. Voided statements are not visible here.
    async fn find_statement_by_id(&self, id: StatementId) -> Result<Option<Statement>>;

    /// Look up a voided statement by id.
    async fn find_voided_statement_by_id(&self, id: StatementId) -> Result<Option<Statement>>;

    /// Fetch the statements matching a filter, ordered and limited per the
    /// filter. Voided statements are excluded.
    async fn find_statements_by(&self, filter: &StatementsFilter) -> Result<Vec<Statement>>;

    /// Store a statement, assigning a fresh id when `generate_id` is set and
    /// the statement carries none. Returns the id the statement was stored
    /// under.
    async fn store_statement(&self, statement: Statement, generate_id: bool)
        -> Result<StatementId>;
}

/// Activity storage.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Look up an activity by its id IRI.
    async fn find_activity_by_id(&self, id: &Iri) -> Result<Option<Activity>>;
}
