//! Driving port for the public opportunity listing.

use async_trait::async_trait;

use crate::domain::{Application, Error, Opportunity, OpportunityId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpportunityBoard: Send + Sync {
    /// Every opportunity, newest first.
    async fn list(&self) -> Result<Vec<Opportunity>, Error>;

    /// Submit a pending application from `user`.
    ///
    /// A repeated application fails with a `Conflict` whose details carry
    /// `code: "already_applied"`.
    async fn apply(&self, user: &UserId, opportunity: OpportunityId)
    -> Result<Application, Error>;
}
