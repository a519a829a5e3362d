//! Port abstraction for opportunity persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewOpportunity, Opportunity, OpportunityFields, OpportunityId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by opportunity repository adapters.
    pub enum OpportunityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "opportunity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "opportunity repository query failed: {message}",
    }
}

/// Ordering applied to `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Selection criteria for [`OpportunityRepository::list`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpportunityQuery {
    /// Restrict to opportunities created by this user.
    pub created_by: Option<UserId>,
    pub order: SortOrder,
}

impl OpportunityQuery {
    /// Every opportunity, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    /// Opportunities created by `user`, newest first.
    pub fn created_by(user: UserId) -> Self {
        Self {
            created_by: Some(user),
            order: SortOrder::NewestFirst,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunityRepository: Send + Sync {
    /// List opportunities matching `query`.
    async fn list(
        &self,
        query: &OpportunityQuery,
    ) -> Result<Vec<Opportunity>, OpportunityRepositoryError>;

    /// Fetch one opportunity.
    async fn find_by_id(
        &self,
        id: OpportunityId,
    ) -> Result<Option<Opportunity>, OpportunityRepositoryError>;

    /// Insert a new opportunity; the adapter assigns `id` and `created_at`.
    async fn insert(
        &self,
        opportunity: &NewOpportunity,
    ) -> Result<Opportunity, OpportunityRepositoryError>;

    /// Replace the editable fields. Returns `false` when no row matched.
    async fn update(
        &self,
        id: OpportunityId,
        fields: &OpportunityFields,
    ) -> Result<bool, OpportunityRepositoryError>;

    /// Delete an opportunity and its applications. Returns `false` when no
    /// row matched.
    async fn delete(&self, id: OpportunityId) -> Result<bool, OpportunityRepositoryError>;
}
