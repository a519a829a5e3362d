//! Driving port for the signed-in user's dashboard.

use async_trait::async_trait;

use crate::domain::{
    ApplicationWithOpportunity, Error, Opportunity, OpportunityForm, OpportunityId, UserId,
};

/// Both dashboard lists, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardData {
    pub opportunities: Vec<Opportunity>,
    pub applications: Vec<ApplicationWithOpportunity>,
}

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub notice: &'static str,
    pub opportunity: Opportunity,
    /// Reset form to render next.
    pub form: OpportunityForm,
    /// Re-fetched dashboard, or `None` when the reload failed.
    pub dashboard: Option<DashboardData>,
}

/// Result of a confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedOpportunity {
    pub notice: &'static str,
    /// Both re-fetched lists, or `None` when the reload failed. The delete
    /// cascades to applications, so "My Applications" changes too.
    pub dashboard: Option<DashboardData>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Dashboard: Send + Sync {
    /// Load the user's opportunities and applications concurrently.
    async fn load(&self, user: &UserId) -> Result<DashboardData, Error>;

    /// Default create form, or an edit form for an owned opportunity.
    async fn form(
        &self,
        user: &UserId,
        edit: Option<OpportunityId>,
    ) -> Result<OpportunityForm, Error>;

    /// Create or update according to the form mode.
    async fn submit(&self, user: &UserId, form: OpportunityForm)
    -> Result<FormSubmission, Error>;

    /// Delete an owned opportunity. Unconfirmed requests are rejected
    /// without touching the store.
    async fn delete(
        &self,
        user: &UserId,
        opportunity: OpportunityId,
        confirmed: bool,
    ) -> Result<DeletedOpportunity, Error>;
}
