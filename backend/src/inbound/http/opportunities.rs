//! Opportunity API handlers.
//!
//! ```text
//! GET    /api/v1/opportunities
//! POST   /api/v1/opportunities
//! PUT    /api/v1/opportunities/{id}
//! DELETE /api/v1/opportunities/{id}?confirm=true
//! POST   /api/v1/opportunities/{id}/applications
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{OpportunityForm, notices};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dashboard::{OpportunityFormRequest, SubmissionResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_opportunity_id;
use crate::inbound::http::views::{
    ApplicationSummary, DashboardView, OpportunityView, opportunity_views,
};

/// Response for a successful application.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    #[schema(example = "Application submitted successfully!")]
    pub notice: String,
    pub application: ApplicationSummary,
}

/// Response for a confirmed deletion. `dashboard` is absent when the lists
/// could not be reloaded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    #[schema(example = "Opportunity deleted")]
    pub notice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardView>,
}

/// Deletion must be confirmed explicitly.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// List every opportunity, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/opportunities",
    responses(
        (status = 200, description = "All opportunities", body = [OpportunityView]),
        (status = 500, description = "Failed to load opportunities", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["opportunities"],
    operation_id = "listOpportunities",
    security([])
)]
#[get("/opportunities")]
pub async fn list_opportunities(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<OpportunityView>>> {
    let opportunities = state.board.list().await?;
    Ok(web::Json(opportunity_views(&opportunities)))
}

/// Apply to an opportunity as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/opportunities/{id}/applications",
    params(("id" = String, Path, description = "Opportunity id")),
    responses(
        (status = 201, description = "Application submitted", body = ApplyResponse),
        (status = 400, description = "Invalid opportunity id", body = ErrorSchema),
        (status = 401, description = "Please sign in to apply", body = ErrorSchema),
        (status = 409, description = "Already applied", body = ErrorSchema),
        (status = 500, description = "Failed to submit application", body = ErrorSchema)
    ),
    tags = ["opportunities"],
    operation_id = "applyToOpportunity"
)]
#[post("/opportunities/{id}/applications")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_TO_APPLY)
        .await?;
    let opportunity = parse_opportunity_id(&path.into_inner())?;
    let application = state.board.apply(current.user_id(), opportunity).await?;
    Ok(HttpResponse::Created().json(ApplyResponse {
        notice: notices::APPLICATION_SUBMITTED.to_owned(),
        application: ApplicationSummary::from(&application),
    }))
}

/// Create an opportunity owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/opportunities",
    request_body = OpportunityFormRequest,
    responses(
        (status = 201, description = "Opportunity created", body = SubmissionResponse),
        (status = 400, description = "Failed to save opportunity", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 500, description = "Failed to save opportunity", body = ErrorSchema)
    ),
    tags = ["opportunities"],
    operation_id = "createOpportunity"
)]
#[post("/opportunities")]
pub async fn create_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OpportunityFormRequest>,
) -> ApiResult<HttpResponse> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_REQUIRED)
        .await?;
    let form = payload.into_inner().into_form()?.into_create();
    let submission = state.dashboard.submit(current.user_id(), form).await?;
    Ok(HttpResponse::Created().json(SubmissionResponse::from(&submission)))
}

/// Replace the fields of an opportunity the signed-in user owns.
#[utoipa::path(
    put,
    path = "/api/v1/opportunities/{id}",
    params(("id" = String, Path, description = "Opportunity id")),
    request_body = OpportunityFormRequest,
    responses(
        (status = 200, description = "Opportunity updated", body = SubmissionResponse),
        (status = 400, description = "Failed to save opportunity", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Opportunity not found", body = ErrorSchema)
    ),
    tags = ["opportunities"],
    operation_id = "updateOpportunity"
)]
#[put("/opportunities/{id}")]
pub async fn update_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<OpportunityFormRequest>,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_REQUIRED)
        .await?;
    let id = parse_opportunity_id(&path.into_inner())?;
    let form: OpportunityForm = payload.into_inner().into_form()?.into_edit(id);
    let submission = state.dashboard.submit(current.user_id(), form).await?;
    Ok(web::Json(SubmissionResponse::from(&submission)))
}

/// Delete an opportunity the signed-in user owns.
#[utoipa::path(
    delete,
    path = "/api/v1/opportunities/{id}",
    params(("id" = String, Path, description = "Opportunity id"), DeleteQuery),
    responses(
        (status = 200, description = "Opportunity deleted", body = DeleteResponse),
        (status = 400, description = "Confirmation required", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Opportunity not found", body = ErrorSchema),
        (status = 500, description = "Failed to delete opportunity", body = ErrorSchema)
    ),
    tags = ["opportunities"],
    operation_id = "deleteOpportunity"
)]
#[delete("/opportunities/{id}")]
pub async fn delete_opportunity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_REQUIRED)
        .await?;
    let id = parse_opportunity_id(&path.into_inner())?;
    let deleted = state
        .dashboard
        .delete(current.user_id(), id, query.confirm)
        .await?;
    Ok(web::Json(DeleteResponse {
        notice: deleted.notice.to_owned(),
        dashboard: deleted.dashboard.as_ref().map(DashboardView::from),
    }))
}

#[cfg(test)]
#[path = "opportunities_tests.rs"]
mod tests;
