//! Dashboard API handlers: the signed-in user's lists and the opportunity
//! form.
//!
//! ```text
//! GET  /api/v1/dashboard
//! GET  /api/v1/dashboard/form?edit={id}
//! POST /api/v1/dashboard/form
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::FormSubmission;
use crate::domain::{Error, OpportunityForm, notices};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_category, parse_opportunity_id};
use crate::inbound::http::views::{DashboardView, OpportunityFormView, OpportunityView};

/// Opportunity form values as submitted by the client.
///
/// Missing text fields default to empty so the domain reports them as a
/// form error instead of a deserialisation failure.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OpportunityFormRequest {
    /// Target of an edit; absent when creating.
    pub opportunity_id: Option<String>,
    #[schema(example = "Park Cleanup")]
    pub title: String,
    #[schema(example = "Help tidy the riverside park")]
    pub description: String,
    #[schema(example = "Environment")]
    pub category: String,
    #[schema(example = "Riverside Park")]
    pub location: String,
    #[schema(example = "3 hours")]
    pub duration: String,
    #[schema(example = 5)]
    pub people_needed: i64,
    #[schema(example = "🌳")]
    pub emoji: String,
}

impl Default for OpportunityFormRequest {
    fn default() -> Self {
        let form = OpportunityForm::create();
        Self {
            opportunity_id: None,
            title: form.title,
            description: form.description,
            category: form.category.as_str().to_owned(),
            location: form.location,
            duration: form.duration,
            people_needed: form.people_needed,
            emoji: form.emoji,
        }
    }
}

impl OpportunityFormRequest {
    /// Parse into a domain form. The mode follows `opportunity_id`.
    pub(crate) fn into_form(self) -> Result<OpportunityForm, Error> {
        let category = parse_category(&self.category)?;
        let form = OpportunityForm {
            title: self.title,
            description: self.description,
            category,
            location: self.location,
            duration: self.duration,
            people_needed: self.people_needed,
            emoji: self.emoji,
            ..OpportunityForm::create()
        };
        match self.opportunity_id {
            Some(raw) => Ok(form.into_edit(parse_opportunity_id(&raw)?)),
            None => Ok(form),
        }
    }
}

/// Outcome of a form submission: the saved opportunity, the reset form and
/// the re-fetched dashboard (absent if the reload failed).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    #[schema(example = "Opportunity created!")]
    pub notice: String,
    pub opportunity: OpportunityView,
    pub form: OpportunityFormView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardView>,
}

impl From<&FormSubmission> for SubmissionResponse {
    fn from(value: &FormSubmission) -> Self {
        Self {
            notice: value.notice.to_owned(),
            opportunity: OpportunityView::from(&value.opportunity),
            form: OpportunityFormView::from(&value.form),
            dashboard: value.dashboard.as_ref().map(DashboardView::from),
        }
    }
}

/// Selects edit mode for the form endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FormQuery {
    /// Opportunity to edit.
    pub edit: Option<String>,
}

/// The signed-in user's opportunities and applications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard lists", body = DashboardView),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 500, description = "Failed to load data", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardView>> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_REQUIRED)
        .await?;
    let data = state.dashboard.load(current.user_id()).await?;
    Ok(web::Json(DashboardView::from(&data)))
}

/// The create form, or the edit form for an owned opportunity.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/form",
    params(FormQuery),
    responses(
        (status = 200, description = "Form state", body = OpportunityFormView),
        (status = 400, description = "Invalid opportunity id", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Opportunity not found", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getOpportunityForm"
)]
#[get("/dashboard/form")]
pub async fn get_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FormQuery>,
) -> ApiResult<web::Json<OpportunityFormView>> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_REQUIRED)
        .await?;
    let edit = query
        .into_inner()
        .edit
        .map(|raw| parse_opportunity_id(&raw))
        .transpose()?;
    let form = state.dashboard.form(current.user_id(), edit).await?;
    Ok(web::Json(OpportunityFormView::from(&form)))
}

/// Submit the form in its current mode.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/form",
    request_body = OpportunityFormRequest,
    responses(
        (status = 200, description = "Opportunity saved", body = SubmissionResponse),
        (status = 400, description = "Failed to save opportunity", body = ErrorSchema),
        (status = 401, description = "Sign in required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 500, description = "Failed to save opportunity", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "submitOpportunityForm"
)]
#[post("/dashboard/form")]
pub async fn submit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OpportunityFormRequest>,
) -> ApiResult<web::Json<SubmissionResponse>> {
    let current = session
        .require(state.session.as_ref(), notices::SIGN_IN_REQUIRED)
        .await?;
    let form = payload.into_inner().into_form()?;
    let submission = state.dashboard.submit(current.user_id(), form).await?;
    Ok(web::Json(SubmissionResponse::from(&submission)))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
