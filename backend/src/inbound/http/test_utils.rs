//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test, web};
use chrono::Utc;

use crate::domain::ports::{
    MockDashboard, MockOpportunityBoard, MockSessionProvider, SessionProvider,
};
use crate::domain::{
    DisplayName, EmailAddress, Opportunity, OpportunityDraft, OpportunityFields, OpportunityId,
    Session, SessionUser, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::HttpState;

/// Route that stores a user id in the cookie without going through sign-in.
pub const TEST_SIGN_IN_ROUTE: &str = "/test/sign-in/{user_id}";

/// Session middleware with a fresh key and an insecure cookie for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

async fn test_sign_in(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|error| crate::domain::Error::invalid_request(error.to_string()))?;
    session.persist_user(&user_id)?;
    session.client_id()?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register [`TEST_SIGN_IN_ROUTE`].
pub fn configure_test_sign_in(cfg: &mut web::ServiceConfig) {
    cfg.route(TEST_SIGN_IN_ROUTE, web::post().to(test_sign_in));
}

/// Request hitting [`TEST_SIGN_IN_ROUTE`] for `user`.
pub fn sign_in_request(user: &UserId) -> test::TestRequest {
    test::TestRequest::post().uri(&format!("/test/sign-in/{user}"))
}

/// A confirmed session for `user`.
pub fn session_for(user: &UserId) -> Session {
    Session {
        user: SessionUser {
            id: user.clone(),
            email: EmailAddress::new("ada@example.org").expect("fixture email"),
            display_name: DisplayName::new("Ada Lovelace").expect("fixture name"),
        },
    }
}

/// Provider that resolves `user` to a session and everyone else to none.
pub fn provider_knowing(user: &UserId) -> MockSessionProvider {
    let known = user.clone();
    let mut provider = MockSessionProvider::new();
    provider.expect_current_session().returning(move |candidate| {
        Ok((*candidate == known).then(|| session_for(candidate)))
    });
    provider
}

/// Handler state over mocked driving ports.
pub fn mock_state(
    session: impl SessionProvider + 'static,
    board: MockOpportunityBoard,
    dashboard: MockDashboard,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(session),
        Arc::new(board),
        Arc::new(dashboard),
    ))
}

/// A stored "Park Cleanup" opportunity owned by `owner`.
pub fn park_cleanup(owner: &UserId) -> Opportunity {
    let fields = OpportunityFields::try_from(OpportunityDraft {
        title: "Park Cleanup".to_owned(),
        description: "Help tidy the riverside park".to_owned(),
        category: "Environment".to_owned(),
        location: "Riverside Park".to_owned(),
        duration: "3 hours".to_owned(),
        people_needed: 5,
        emoji: "🌳".to_owned(),
    })
    .expect("fixture fields");
    Opportunity::new(OpportunityId::random(), fields, owner.clone(), Utc::now())
}
