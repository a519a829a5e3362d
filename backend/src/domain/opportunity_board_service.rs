//! Public opportunity listing and applications.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::opportunity_service_support::{map_application_error, map_opportunity_error};
use crate::domain::ports::{
    ApplicationRepository, OpportunityBoard, OpportunityQuery, OpportunityRepository,
};
use crate::domain::{
    Application, Error, NewApplication, Opportunity, OpportunityId, UserId, notices,
};

/// Opportunity board implementing the [`OpportunityBoard`] driving port.
#[derive(Clone)]
pub struct OpportunityBoardService<O, A> {
    opportunities: Arc<O>,
    applications: Arc<A>,
}

impl<O, A> OpportunityBoardService<O, A> {
    pub fn new(opportunities: Arc<O>, applications: Arc<A>) -> Self {
        Self {
            opportunities,
            applications,
        }
    }
}

#[async_trait]
impl<O, A> OpportunityBoard for OpportunityBoardService<O, A>
where
    O: OpportunityRepository,
    A: ApplicationRepository,
{
    async fn list(&self) -> Result<Vec<Opportunity>, Error> {
        self.opportunities
            .list(&OpportunityQuery::all())
            .await
            .map_err(|error| map_opportunity_error(notices::FAILED_TO_LOAD_OPPORTUNITIES, error))
    }

    async fn apply(
        &self,
        user: &UserId,
        opportunity: OpportunityId,
    ) -> Result<Application, Error> {
        let request = NewApplication {
            opportunity_id: opportunity,
            user_id: user.clone(),
        };
        let application = self
            .applications
            .insert(&request)
            .await
            .map_err(|error| map_application_error(notices::APPLICATION_FAILED, error))?;
        info!(
            application_id = %application.id,
            opportunity_id = %opportunity,
            user_id = %user,
            "application submitted"
        );
        Ok(application)
    }
}
