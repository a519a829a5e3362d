//! PostgreSQL-backed `OpportunityRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    OpportunityQuery, OpportunityRepository, OpportunityRepositoryError, SortOrder,
};
use crate::domain::{
    NewOpportunity, Opportunity, OpportunityDraft, OpportunityFields, OpportunityId,
    OpportunityValidationError, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewOpportunityRow, OpportunityChangeset, OpportunityRow};
use super::pool::{DbPool, PoolError};
use super::schema::opportunities;

/// Diesel-backed implementation of the `OpportunityRepository` port.
#[derive(Clone)]
pub struct DieselOpportunityRepository {
    pool: DbPool,
}

impl DieselOpportunityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OpportunityRepositoryError {
    map_basic_pool_error(error, OpportunityRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OpportunityRepositoryError {
    map_basic_diesel_error(
        error,
        OpportunityRepositoryError::query,
        OpportunityRepositoryError::connection,
    )
}

/// Rebuild a domain opportunity from a stored row, re-validating its fields.
pub(crate) fn row_to_opportunity(
    row: OpportunityRow,
) -> Result<Opportunity, OpportunityValidationError> {
    let fields = OpportunityFields::try_from(OpportunityDraft {
        title: row.title,
        description: row.description,
        category: row.category,
        location: row.location,
        duration: row.duration,
        people_needed: i64::from(row.people_needed),
        emoji: row.emoji,
    })?;
    Ok(Opportunity::new(
        OpportunityId::from_uuid(row.id),
        fields,
        UserId::from_uuid(row.created_by),
        row.created_at,
    ))
}

fn to_domain(row: OpportunityRow) -> Result<Opportunity, OpportunityRepositoryError> {
    let id = row.id;
    row_to_opportunity(row).map_err(|error| {
        OpportunityRepositoryError::query(format!("stored opportunity {id} is invalid: {error}"))
    })
}

#[async_trait]
impl OpportunityRepository for DieselOpportunityRepository {
    async fn list(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = opportunities::table
            .select(OpportunityRow::as_select())
            .into_boxed();
        if let Some(owner) = &query.created_by {
            statement = statement.filter(opportunities::created_by.eq(*owner.as_uuid()));
        }
        statement = match query.order {
            SortOrder::NewestFirst => statement.order(opportunities::created_at.desc()),
            SortOrder::OldestFirst => statement.order(opportunities::created_at.asc()),
        };

        let rows: Vec<OpportunityRow> = statement
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(
        &self,
        id: OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<OpportunityRow> = opportunities::table
            .find(*id.as_uuid())
            .select(OpportunityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_domain).transpose()
    }

    async fn insert(
        &self,
        opportunity: &NewOpportunity,
    ) -> Result<Opportunity, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let fields = &opportunity.fields;
        let new_row = NewOpportunityRow {
            id: *OpportunityId::random().as_uuid(),
            title: fields.title(),
            description: fields.description(),
            category: fields.category().as_str(),
            location: fields.location(),
            duration: fields.duration(),
            people_needed: fields.people_needed().as_i32(),
            emoji: fields.emoji(),
            created_by: *opportunity.created_by.as_uuid(),
        };

        let row: OpportunityRow = diesel::insert_into(opportunities::table)
            .values(&new_row)
            .returning(OpportunityRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        to_domain(row)
    }

    async fn update(
        &self,
        id: OpportunityId,
        fields: &OpportunityFields,
    ) -> Result<bool, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = OpportunityChangeset {
            title: fields.title(),
            description: fields.description(),
            category: fields.category().as_str(),
            location: fields.location(),
            duration: fields.duration(),
            people_needed: fields.people_needed().as_i32(),
            emoji: fields.emoji(),
        };

        let updated = diesel::update(opportunities::table.find(*id.as_uuid()))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: OpportunityId) -> Result<bool, OpportunityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Applications go with it through ON DELETE CASCADE.
        let deleted = diesel::delete(opportunities::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
