//! Criteria for statement collection lookups.

use chrono::{DateTime, Utc};

use super::{Agent, Iri};

/// Result ordering by stored timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Criteria for a statement collection lookup.
///
/// Built in one step from a validated query; never mutated afterwards. All
/// criteria are conjunctive. A `limit` of 0 means unlimited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementsFilter {
    pub actor: Option<Agent>,
    pub verb: Option<Iri>,
    pub activity: Option<Iri>,
    pub registration: Option<String>,
    pub related_activities: bool,
    pub related_agents: bool,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub order: SortOrder,
    pub limit: u64,
}
