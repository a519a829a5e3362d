//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.
//!
//! The `(opportunity_id, user_id)` unique constraint is the only guard
//! against duplicate applications; its violation is reported as
//! [`ApplicationRepositoryError::AlreadyApplied`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError, SortOrder};
use crate::domain::{
    Application, ApplicationId, ApplicationStatus, ApplicationWithOpportunity, NewApplication,
    OpportunityId, UserId,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_opportunity_repository::row_to_opportunity;
use super::models::{ApplicationRow, NewApplicationRow, OpportunityRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, opportunities};

/// Diesel-backed implementation of the `ApplicationRepository` port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_basic_pool_error(error, ApplicationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    if is_unique_violation(&error) {
        return ApplicationRepositoryError::already_applied();
    }
    map_basic_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    let status = row.status.parse::<ApplicationStatus>().map_err(|error| {
        ApplicationRepositoryError::query(format!("stored application {} is invalid: {error}", row.id))
    })?;
    Ok(Application {
        id: ApplicationId::from_uuid(row.id),
        opportunity_id: OpportunityId::from_uuid(row.opportunity_id),
        user_id: UserId::from_uuid(row.user_id),
        status,
        created_at: row.created_at,
    })
}

fn joined_to_domain(
    (application, opportunity): (ApplicationRow, OpportunityRow),
) -> Result<ApplicationWithOpportunity, ApplicationRepositoryError> {
    let opportunity_id = opportunity.id;
    let opportunity = row_to_opportunity(opportunity).map_err(|error| {
        ApplicationRepositoryError::query(format!(
            "stored opportunity {opportunity_id} is invalid: {error}"
        ))
    })?;
    Ok(ApplicationWithOpportunity {
        application: row_to_application(application)?,
        opportunity,
    })
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewApplicationRow {
            id: *ApplicationId::random().as_uuid(),
            opportunity_id: *application.opportunity_id.as_uuid(),
            user_id: *application.user_id.as_uuid(),
            status: ApplicationStatus::Pending.as_str(),
        };

        let row: ApplicationRow = diesel::insert_into(applications::table)
            .values(&new_row)
            .returning(ApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_application(row)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
        order: SortOrder,
    ) -> Result<Vec<ApplicationWithOpportunity>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let base = applications::table
            .inner_join(opportunities::table)
            .filter(applications::user_id.eq(*user.as_uuid()))
            .select((ApplicationRow::as_select(), OpportunityRow::as_select()))
            .into_boxed();
        let statement = match order {
            SortOrder::NewestFirst => base.order(applications::created_at.desc()),
            SortOrder::OldestFirst => base.order(applications::created_at.asc()),
        };

        let rows: Vec<(ApplicationRow, OpportunityRow)> = statement
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(joined_to_domain).collect()
    }
}
