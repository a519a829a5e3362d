//! Internal helpers shared by the opportunity board and dashboard services.
//!
//! Store failures are logged with their cause and surfaced to callers with a
//! fixed notice, so internal messages never reach the client.

use serde_json::json;
use tracing::error;

use crate::domain::ports::{
    ApplicationRepositoryError, OpportunityRepository, OpportunityRepositoryError,
};
use crate::domain::{Error, Opportunity, OpportunityId, OpportunityValidationError, UserId, notices};

pub(crate) fn map_opportunity_error(notice: &'static str, error: OpportunityRepositoryError) -> Error {
    error!(%error, notice, "opportunity repository failure");
    match error {
        OpportunityRepositoryError::Connection { .. } => Error::service_unavailable(notice),
        OpportunityRepositoryError::Query { .. } => Error::internal(notice),
    }
}

pub(crate) fn map_application_error(notice: &'static str, error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::AlreadyApplied => Error::conflict(notices::ALREADY_APPLIED)
            .with_details(json!({ "code": "already_applied" })),
        ApplicationRepositoryError::Connection { .. } => {
            error!(%error, notice, "application repository failure");
            Error::service_unavailable(notice)
        }
        ApplicationRepositoryError::Query { .. } => {
            error!(%error, notice, "application repository failure");
            Error::internal(notice)
        }
    }
}

pub(crate) fn invalid_form(error: &OpportunityValidationError) -> Error {
    Error::invalid_request(notices::OPPORTUNITY_SAVE_FAILED).with_details(json!({
        "code": "invalid_field",
        "field": error.field(),
        "reason": error.to_string(),
    }))
}

/// Fetch `id` and check that `user` created it.
pub(crate) async fn find_owned<R>(
    repo: &R,
    user: &UserId,
    id: OpportunityId,
    notice: &'static str,
) -> Result<Opportunity, Error>
where
    R: OpportunityRepository + ?Sized,
{
    let opportunity = repo
        .find_by_id(id)
        .await
        .map_err(|error| map_opportunity_error(notice, error))?
        .ok_or_else(|| Error::not_found(notices::OPPORTUNITY_NOT_FOUND))?;
    if !opportunity.is_owned_by(user) {
        return Err(Error::forbidden(notices::NOT_OPPORTUNITY_OWNER));
    }
    Ok(opportunity)
}
