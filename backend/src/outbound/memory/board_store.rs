//! Opportunities and applications held in one shared map so deletes can
//! cascade atomically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, OpportunityQuery, OpportunityRepository,
    OpportunityRepositoryError, SortOrder,
};
use crate::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationWithOpportunity, NewApplication,
    NewOpportunity, Opportunity, OpportunityFields, OpportunityId, UserId,
};

use super::lock;

/// Row plus the insertion sequence used to break `created_at` ties.
#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct Board {
    next_seq: u64,
    opportunities: HashMap<OpportunityId, Stored<Opportunity>>,
    applications: Vec<Stored<Application>>,
}

impl Board {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

fn sort_by_creation<T>(
    rows: &mut [(u64, chrono::DateTime<chrono::Utc>, T)],
    order: SortOrder,
) {
    rows.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));
    if order == SortOrder::NewestFirst {
        rows.reverse();
    }
}

/// In-memory store implementing both board repositories.
#[derive(Clone)]
pub struct InMemoryBoardStore {
    board: Arc<Mutex<Board>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryBoardStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::default())),
            clock,
        }
    }
}

#[async_trait]
impl OpportunityRepository for InMemoryBoardStore {
    async fn list(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError> {
        let board = lock(&self.board);
        let mut rows: Vec<_> = board
            .opportunities
            .values()
            .filter(|stored| {
                query
                    .created_by
                    .as_ref()
                    .is_none_or(|owner| stored.value.is_owned_by(owner))
            })
            .map(|stored| (stored.seq, stored.value.created_at(), stored.value.clone()))
            .collect();
        sort_by_creation(&mut rows, query.order);
        Ok(rows.into_iter().map(|(_, _, opportunity)| opportunity).collect())
    }

    async fn find_by_id(
        &self,
        id: OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError> {
        let board = lock(&self.board);
        Ok(board.opportunities.get(&id).map(|stored| stored.value.clone()))
    }

    async fn insert(
        &self,
        opportunity: &NewOpportunity,
    ) -> Result<Opportunity, OpportunityRepositoryError> {
        let created = Opportunity::new(
            OpportunityId::random(),
            opportunity.fields.clone(),
            opportunity.created_by.clone(),
            self.clock.utc(),
        );
        let mut board = lock(&self.board);
        let seq = board.next_seq();
        board.opportunities.insert(
            created.id(),
            Stored {
                seq,
                value: created.clone(),
            },
        );
        Ok(created)
    }

    async fn update(
        &self,
        id: OpportunityId,
        fields: &OpportunityFields,
    ) -> Result<bool, OpportunityRepositoryError> {
        let mut board = lock(&self.board);
        let Some(stored) = board.opportunities.get_mut(&id) else {
            return Ok(false);
        };
        stored.value = stored.value.clone().with_fields(fields.clone());
        Ok(true)
    }

    async fn delete(&self, id: OpportunityId) -> Result<bool, OpportunityRepositoryError> {
        let mut board = lock(&self.board);
        if board.opportunities.remove(&id).is_none() {
            return Ok(false);
        }
        board
            .applications
            .retain(|stored| stored.value.opportunity_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryBoardStore {
    async fn insert(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApplicationRepositoryError> {
        let created_at = self.clock.utc();
        let mut board = lock(&self.board);
        if !board
            .opportunities
            .contains_key(&application.opportunity_id)
        {
            return Err(ApplicationRepositoryError::query(format!(
                "opportunity {} does not exist",
                application.opportunity_id
            )));
        }
        let duplicate = board.applications.iter().any(|stored| {
            stored.value.opportunity_id == application.opportunity_id
                && stored.value.user_id == application.user_id
        });
        if duplicate {
            return Err(ApplicationRepositoryError::already_applied());
        }
        let created = Application {
            id: ApplicationId::random(),
            opportunity_id: application.opportunity_id,
            user_id: application.user_id.clone(),
            status: ApplicationStatus::Pending,
            created_at,
        };
        let seq = board.next_seq();
        board.applications.push(Stored {
            seq,
            value: created.clone(),
        });
        Ok(created)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
        order: SortOrder,
    ) -> Result<Vec<ApplicationWithOpportunity>, ApplicationRepositoryError> {
        let board = lock(&self.board);
        let mut rows: Vec<_> = board
            .applications
            .iter()
            .filter(|stored| stored.value.user_id == *user)
            .filter_map(|stored| {
                let opportunity = board.opportunities.get(&stored.value.opportunity_id)?;
                Some((
                    stored.seq,
                    stored.value.created_at,
                    ApplicationWithOpportunity {
                        application: stored.value.clone(),
                        opportunity: opportunity.value.clone(),
                    },
                ))
            })
            .collect();
        sort_by_creation(&mut rows, order);
        Ok(rows.into_iter().map(|(_, _, joined)| joined).collect())
    }
}
