//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/auth/sign-in {"email":"ada@example.org","password":"hunter22"}
//! POST /api/v1/auth/sign-up {"email":"ada@example.org","password":"hunter22","fullName":"Ada"}
//! POST /api/v1/auth/sign-out
//! GET  /api/v1/auth/verify?token=...
//! GET  /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AuthValidationError, Credentials, Error, SignUpDetails, notices};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SIGN_IN_PATH, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_token;
use crate::inbound::http::views::{NoticeResponse, SessionView};

/// Where the client goes after signing in, signing up or signing out.
const HOME: &str = "/";

/// Sign-in request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[schema(example = "hunter22")]
    pub password: String,
}

impl TryFrom<SignInRequest> for Credentials {
    type Error = AuthValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Sign-up request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[schema(example = "ada@example.org")]
    pub email: String,
    #[schema(example = "hunter22")]
    pub password: String,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
}

impl TryFrom<SignUpRequest> for SignUpDetails {
    type Error = AuthValidationError;

    fn try_from(value: SignUpRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password, &value.full_name)
    }
}

/// Query string of the emailed verification link.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyQuery {
    /// One-time token from the verification email.
    pub token: Option<String>,
}

fn map_auth_validation_error(err: &AuthValidationError) -> Error {
    let (field, code) = match err {
        AuthValidationError::Email(_) => ("email", "invalid_email"),
        AuthValidationError::DisplayName(_) => ("fullName", "invalid_full_name"),
        AuthValidationError::EmptyPassword => ("password", "empty_password"),
        AuthValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Verify credentials and establish a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = NoticeResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials or unconfirmed email", body = ErrorSchema),
        (status = 503, description = "Account store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<NoticeResponse>> {
    let credentials = Credentials::try_from(payload.into_inner())
        .map_err(|err| map_auth_validation_error(&err))?;
    let client = session.client_id()?;
    let established = state.session.sign_in(&credentials).await?;
    session.persist_user(established.user_id())?;
    state.session.announce_sign_in(client, &established);
    Ok(web::Json(NoticeResponse::with_redirect(
        Some(notices::SIGNED_IN),
        HOME,
    )))
}

/// Register an unconfirmed account and send the verification email.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created; confirmation pending", body = NoticeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "User already registered", body = ErrorSchema),
        (status = 503, description = "Account store or mailer unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignUpDetails::try_from(payload.into_inner())
        .map_err(|err| map_auth_validation_error(&err))?;
    state.session.sign_up(&details).await?;
    Ok(HttpResponse::Created().json(NoticeResponse::with_redirect(
        Some(notices::ACCOUNT_CREATED),
        HOME,
    )))
}

/// End the session for this browser.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses(
        (status = 200, description = "Signed out", body = NoticeResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signOut"
)]
#[post("/auth/sign-out")]
pub async fn sign_out(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NoticeResponse>> {
    let client = session.client_id()?;
    state.session.sign_out(client).await?;
    session.clear_user();
    Ok(web::Json(NoticeResponse::with_redirect(None, HOME)))
}

/// Confirm an email address from the emailed link.
#[utoipa::path(
    get,
    path = "/api/v1/auth/verify",
    params(VerifyQuery),
    responses(
        (status = 200, description = "Email confirmed", body = NoticeResponse),
        (status = 400, description = "Missing token", body = ErrorSchema),
        (status = 404, description = "Unknown or used token", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "verifyEmail",
    security([])
)]
#[get("/auth/verify")]
pub async fn verify_email(
    state: web::Data<HttpState>,
    query: web::Query<VerifyQuery>,
) -> ApiResult<web::Json<NoticeResponse>> {
    let token = parse_token(query.into_inner().token)?;
    state.session.confirm_email(&token).await?;
    Ok(web::Json(NoticeResponse::with_redirect(
        Some(notices::EMAIL_CONFIRMED),
        SIGN_IN_PATH,
    )))
}

/// Current session, or `null` for anonymous visitors.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session or null", body = SessionView),
        (status = 503, description = "Account store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let current = session.resolve(state.session.as_ref()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(current.as_ref().map(SessionView::from)))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
