//! Port abstraction for application persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationWithOpportunity, NewApplication, UserId};

use super::{SortOrder, define_port_error};

define_port_error! {
    /// Persistence errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// The user already has an application for this opportunity.
        AlreadyApplied => "application already exists for this opportunity and user",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a pending application.
    ///
    /// Fails with [`ApplicationRepositoryError::AlreadyApplied`] when the
    /// `(opportunity_id, user_id)` pair already exists.
    async fn insert(
        &self,
        application: &NewApplication,
    ) -> Result<Application, ApplicationRepositoryError>;

    /// Applications submitted by `user`, joined with their opportunities.
    async fn list_for_user(
        &self,
        user: &UserId,
        order: SortOrder,
    ) -> Result<Vec<ApplicationWithOpportunity>, ApplicationRepositoryError>;
}
