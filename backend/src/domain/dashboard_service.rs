//! Dashboard use-cases: the signed-in user's own opportunities and
//! applications, and the create/edit/delete flows for opportunities.
//!
//! Every successful mutation re-queries the store instead of patching the
//! previous lists, so the returned state always reflects what was persisted.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::opportunity_service_support::{
    find_owned, invalid_form, map_application_error, map_opportunity_error,
};
use crate::domain::ports::{
    ApplicationRepository, Dashboard, DashboardData, DeletedOpportunity, FormSubmission,
    OpportunityQuery, OpportunityRepository, SortOrder,
};
use crate::domain::{
    Error, FormMode, NewOpportunity, Opportunity, OpportunityForm, OpportunityId, UserId, notices,
};

/// Dashboard implementing the [`Dashboard`] driving port.
#[derive(Clone)]
pub struct DashboardService<O, A> {
    opportunities: Arc<O>,
    applications: Arc<A>,
}

impl<O, A> DashboardService<O, A> {
    pub fn new(opportunities: Arc<O>, applications: Arc<A>) -> Self {
        Self {
            opportunities,
            applications,
        }
    }
}

impl<O, A> DashboardService<O, A>
where
    O: OpportunityRepository,
    A: ApplicationRepository,
{
    async fn owned_opportunities(&self, user: &UserId) -> Result<Vec<Opportunity>, Error> {
        self.opportunities
            .list(&OpportunityQuery::created_by(user.clone()))
            .await
            .map_err(|error| map_opportunity_error(notices::FAILED_TO_LOAD_DATA, error))
    }

    async fn reload(&self, user: &UserId) -> Option<DashboardData> {
        match self.load(user).await {
            Ok(data) => Some(data),
            Err(error) => {
                warn!(%user, %error, "dashboard reload after mutation failed");
                None
            }
        }
    }

    async fn create(&self, user: &UserId, form: &OpportunityForm) -> Result<Opportunity, Error> {
        let fields = form.to_fields().map_err(|error| invalid_form(&error))?;
        let request = NewOpportunity {
            created_by: user.clone(),
            fields,
        };
        let created = self
            .opportunities
            .insert(&request)
            .await
            .map_err(|error| map_opportunity_error(notices::OPPORTUNITY_SAVE_FAILED, error))?;
        info!(opportunity_id = %created.id(), %user, "opportunity created");
        Ok(created)
    }

    async fn update(
        &self,
        user: &UserId,
        id: OpportunityId,
        form: &OpportunityForm,
    ) -> Result<Opportunity, Error> {
        let fields = form.to_fields().map_err(|error| invalid_form(&error))?;
        let existing = find_owned(
            self.opportunities.as_ref(),
            user,
            id,
            notices::OPPORTUNITY_SAVE_FAILED,
        )
        .await?;
        let matched = self
            .opportunities
            .update(id, &fields)
            .await
            .map_err(|error| map_opportunity_error(notices::OPPORTUNITY_SAVE_FAILED, error))?;
        if !matched {
            return Err(Error::not_found(notices::OPPORTUNITY_NOT_FOUND));
        }
        info!(opportunity_id = %id, %user, "opportunity updated");
        Ok(existing.with_fields(fields))
    }
}

#[async_trait]
impl<O, A> Dashboard for DashboardService<O, A>
where
    O: OpportunityRepository,
    A: ApplicationRepository,
{
    async fn load(&self, user: &UserId) -> Result<DashboardData, Error> {
        let applications = async {
            self.applications
                .list_for_user(user, SortOrder::NewestFirst)
                .await
                .map_err(|error| map_application_error(notices::FAILED_TO_LOAD_DATA, error))
        };
        let (opportunities, applications) =
            try_join(self.owned_opportunities(user), applications).await?;
        Ok(DashboardData {
            opportunities,
            applications,
        })
    }

    async fn form(
        &self,
        user: &UserId,
        edit: Option<OpportunityId>,
    ) -> Result<OpportunityForm, Error> {
        match edit {
            None => Ok(OpportunityForm::create()),
            Some(id) => {
                let opportunity = find_owned(
                    self.opportunities.as_ref(),
                    user,
                    id,
                    notices::FAILED_TO_LOAD_DATA,
                )
                .await?;
                Ok(OpportunityForm::edit(&opportunity))
            }
        }
    }

    async fn submit(
        &self,
        user: &UserId,
        form: OpportunityForm,
    ) -> Result<FormSubmission, Error> {
        let (notice, opportunity) = match form.mode {
            FormMode::Create => (notices::OPPORTUNITY_CREATED, self.create(user, &form).await?),
            FormMode::Edit { opportunity_id } => (
                notices::OPPORTUNITY_UPDATED,
                self.update(user, opportunity_id, &form).await?,
            ),
        };
        Ok(FormSubmission {
            notice,
            opportunity,
            form: OpportunityForm::create(),
            dashboard: self.reload(user).await,
        })
    }

    async fn delete(
        &self,
        user: &UserId,
        opportunity: OpportunityId,
        confirmed: bool,
    ) -> Result<DeletedOpportunity, Error> {
        if !confirmed {
            return Err(Error::invalid_request(notices::CONFIRM_DELETE)
                .with_details(json!({ "code": "confirmation_required" })));
        }
        find_owned(
            self.opportunities.as_ref(),
            user,
            opportunity,
            notices::OPPORTUNITY_DELETE_FAILED,
        )
        .await?;
        let deleted = self
            .opportunities
            .delete(opportunity)
            .await
            .map_err(|error| map_opportunity_error(notices::OPPORTUNITY_DELETE_FAILED, error))?;
        if !deleted {
            return Err(Error::not_found(notices::OPPORTUNITY_NOT_FOUND));
        }
        info!(opportunity_id = %opportunity, %user, "opportunity deleted");

        Ok(DeletedOpportunity {
            notice: notices::OPPORTUNITY_DELETED,
            dashboard: self.reload(user).await,
        })
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
