//! In-memory LRS storage.
//!
//! Reference implementation of the repository traits. Statements targeted by
//! a voiding statement move out of the regular read paths and become visible
//! only through the voided-statement lookup, matching xAPI voiding rules.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    Activity, Agent, Iri, SortOrder, Statement, StatementId, StatementObject, StatementsFilter,
};

use super::{ActivityRepository, LrsError, Result, StatementRepository};

/// In-memory statement and activity store.
#[derive(Default)]
pub struct MemoryLrs {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    statements: HashMap<StatementId, Statement>,
    voided: HashSet<StatementId>,
    activities: HashMap<Iri, Activity>,
}

impl MemoryLrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an activity so it can be served by the activities endpoint.
    pub async fn insert_activity(&self, activity: Activity) {
        let mut inner = self.inner.write().await;
        inner.activities.insert(activity.id.clone(), activity);
    }

    /// Number of stored statements, voided ones included.
    pub async fn statement_count(&self) -> usize {
        self.inner.read().await.statements.len()
    }
}

#[async_trait]
impl StatementRepository for MemoryLrs {
    async fn find_statement_by_id(&self, id: StatementId) -> Result<Option<Statement>> {
        let inner = self.inner.read().await;
        if inner.voided.contains(&id) {
            return Ok(None);
        }
        Ok(inner.statements.get(&id).cloned())
    }

    async fn find_voided_statement_by_id(&self, id: StatementId) -> Result<Option<Statement>> {
        let inner = self.inner.read().await;
        if !inner.voided.contains(&id) {
            return Ok(None);
        }
        Ok(inner.statements.get(&id).cloned())
    }

    async fn find_statements_by(&self, filter: &StatementsFilter) -> Result<Vec<Statement>> {
        let inner = self.inner.read().await;

        let mut matches: Vec<Statement> = inner
            .statements
            .values()
            .filter(|s| {
                let id_voided = s.id.map(|id| inner.voided.contains(&id)).unwrap_or(false);
                !id_voided && matches_filter(filter, s)
            })
            .cloned()
            .collect();

        matches.sort_by_key(|s| s.stored);
        if filter.order == SortOrder::Descending {
            matches.reverse();
        }
        if filter.limit > 0 {
            matches.truncate(filter.limit as usize);
        }

        Ok(matches)
    }

    async fn store_statement(
        &self,
        mut statement: Statement,
        generate_id: bool,
    ) -> Result<StatementId> {
        let id = match statement.id {
            Some(id) => id,
            None if generate_id => StatementId::from_uuid(Uuid::new_v4()),
            None => {
                return Err(LrsError::Storage(
                    "cannot store a statement without an id".to_string(),
                ))
            }
        };
        statement.id = Some(id);

        if statement.stored.is_none() {
            statement.stored = Some(Utc::now());
        }

        let mut inner = self.inner.write().await;
        if let Some(target) = statement.voided_target() {
            inner.voided.insert(target);
        }
        inner.statements.insert(id, statement);

        Ok(id)
    }
}

#[async_trait]
impl ActivityRepository for MemoryLrs {
    async fn find_activity_by_id(&self, id: &Iri) -> Result<Option<Activity>> {
        Ok(self.inner.read().await.activities.get(id).cloned())
    }
}

fn matches_filter(filter: &StatementsFilter, statement: &Statement) -> bool {
    if let Some(actor) = &filter.actor {
        if !matches_actor(actor, statement, filter.related_agents) {
            return false;
        }
    }

    if let Some(verb) = &filter.verb {
        if statement.verb.id != *verb {
            return false;
        }
    }

    if let Some(activity) = &filter.activity {
        if !matches_activity(activity, statement, filter.related_activities) {
            return false;
        }
    }

    if let Some(registration) = &filter.registration {
        let statement_registration = statement
            .context
            .as_ref()
            .and_then(|c| c.registration.as_ref());
        if statement_registration != Some(registration) {
            return false;
        }
    }

    if let Some(since) = filter.since {
        match statement.stored {
            Some(stored) if stored > since => {}
            _ => return false,
        }
    }

    if let Some(until) = filter.until {
        match statement.stored {
            Some(stored) if stored <= until => {}
            _ => return false,
        }
    }

    true
}

fn matches_actor(actor: &Agent, statement: &Statement, related: bool) -> bool {
    if statement.actor.same_identity(actor) {
        return true;
    }
    if !related {
        return false;
    }

    if let StatementObject::Agent(object) = &statement.object {
        if object.same_identity(actor) {
            return true;
        }
    }

    statement
        .context
        .as_ref()
        .and_then(|c| c.instructor.as_ref())
        .map(|instructor| instructor.same_identity(actor))
        .unwrap_or(false)
}

fn matches_activity(activity: &Iri, statement: &Statement, related: bool) -> bool {
    if let StatementObject::Activity(object) = &statement.object {
        if object.id == *activity {
            return true;
        }
    }
    if !related {
        return false;
    }

    statement
        .context
        .as_ref()
        .and_then(|c| c.context_activities.as_ref())
        .map(|activities| activities.iter().any(|a| a.id == *activity))
        .unwrap_or(false)
}
