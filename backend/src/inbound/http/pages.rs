//! Page view endpoints.
//!
//! Each page returns the JSON view model a client renders: the header for
//! the current session, the static footer and the page body. Fetch failures
//! degrade to empty lists plus a notice rather than an error response.
//!
//! ```text
//! GET /               landing
//! GET /opportunities  listing
//! GET /dashboard      303 -> /auth without a session
//! GET /auth           303 -> / with a session
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use tracing::warn;

use crate::domain::landing::{LANDING, LandingContent};
use crate::domain::pages::{AUTH, AuthCopy, DASHBOARD, DashboardCopy, LISTING, ListingCopy};
use crate::domain::{FOOTER, FooterView, HeaderView, OpportunityForm, notices};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{SIGN_IN_PATH, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{
    ApplicationView, OpportunityFormView, OpportunityView, opportunity_views,
};

const HOME: &str = "/";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LandingPage {
    header: HeaderView,
    footer: FooterView,
    landing: LandingContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingPage {
    header: HeaderView,
    footer: FooterView,
    copy: ListingCopy,
    opportunities: Vec<OpportunityView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'static str>,
    can_apply: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardPage {
    header: HeaderView,
    footer: FooterView,
    copy: DashboardCopy,
    opportunities: Vec<OpportunityView>,
    applications: Vec<ApplicationView>,
    form: OpportunityFormView,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthPage {
    header: HeaderView,
    footer: FooterView,
    copy: AuthCopy,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn page<T: Serialize>(body: &T) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}

/// Landing page.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page view")),
    tags = ["pages"],
    operation_id = "landingPage",
    security([])
)]
#[get("/")]
pub async fn landing_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let current = session.resolve(state.session.as_ref()).await?;
    Ok(page(&LandingPage {
        header: HeaderView::for_session(current.as_ref()),
        footer: FOOTER,
        landing: LANDING,
    }))
}

/// Public opportunity listing.
#[utoipa::path(
    get,
    path = "/opportunities",
    responses((status = 200, description = "Listing page view")),
    tags = ["pages"],
    operation_id = "listingPage",
    security([])
)]
#[get("/opportunities")]
pub async fn listing_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let current = session.resolve(state.session.as_ref()).await?;
    let (opportunities, notice) = match state.board.list().await {
        Ok(found) => (opportunity_views(&found), None),
        Err(error) => {
            warn!(%error, "listing page fell back to an empty list");
            (Vec::new(), Some(notices::FAILED_TO_LOAD_OPPORTUNITIES))
        }
    };
    Ok(page(&ListingPage {
        header: HeaderView::for_session(current.as_ref()),
        footer: FOOTER,
        copy: LISTING,
        opportunities,
        notice,
        can_apply: current.is_some(),
    }))
}

/// Signed-in dashboard; anonymous visitors are redirected to sign in.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard page view"),
        (status = 303, description = "Redirect to /auth without a session")
    ),
    tags = ["pages"],
    operation_id = "dashboardPage"
)]
#[get("/dashboard")]
pub async fn dashboard_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(current) = session.resolve(state.session.as_ref()).await? else {
        return Ok(see_other(SIGN_IN_PATH));
    };
    let (opportunities, applications, notice) =
        match state.dashboard.load(current.user_id()).await {
            Ok(data) => (
                opportunity_views(&data.opportunities),
                data.applications.iter().map(ApplicationView::from).collect(),
                None,
            ),
            Err(error) => {
                warn!(
                    user = %current.user_id(),
                    %error,
                    "dashboard page fell back to empty lists"
                );
                (Vec::new(), Vec::new(), Some(notices::FAILED_TO_LOAD_DATA))
            }
        };
    Ok(page(&DashboardPage {
        header: HeaderView::for_session(Some(&current)),
        footer: FOOTER,
        copy: DASHBOARD,
        opportunities,
        applications,
        form: OpportunityFormView::from(&OpportunityForm::create()),
        notice,
    }))
}

/// Sign-in and sign-up page; signed-in visitors are sent home.
#[utoipa::path(
    get,
    path = "/auth",
    responses(
        (status = 200, description = "Auth page view"),
        (status = 303, description = "Redirect to / with a session")
    ),
    tags = ["pages"],
    operation_id = "authPage",
    security([])
)]
#[get("/auth")]
pub async fn auth_page(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if session.resolve(state.session.as_ref()).await?.is_some() {
        return Ok(see_other(HOME));
    }
    Ok(page(&AuthPage {
        header: HeaderView::for_session(None),
        footer: FOOTER,
        copy: AUTH,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{
        DashboardData, MockDashboard, MockOpportunityBoard, MockSessionProvider,
    };
    use crate::domain::{Error, UserId};
    use crate::inbound::http::test_utils::{
        configure_test_sign_in, mock_state, park_cleanup, provider_knowing, session_cookie,
        sign_in_request, test_session_middleware,
    };

    macro_rules! pages_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .wrap(test_session_middleware())
                    .configure(configure_test_sign_in)
                    .service(landing_page)
                    .service(listing_page)
                    .service(dashboard_page)
                    .service(auth_page),
            )
            .await
        };
    }

    #[rstest]
    #[actix_web::test]
    async fn landing_renders_the_anonymous_shell() {
        let app = pages_app!(mock_state(
            MockSessionProvider::new(),
            MockOpportunityBoard::new(),
            MockDashboard::new()
        ));

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["header"]["brand"], json!("Community"));
        assert_eq!(body["header"]["links"][0]["href"], json!("/auth"));
        assert_eq!(body["footer"]["sections"][1]["title"], json!("Company"));
        assert_eq!(
            body["landing"]["hero"]["title"],
            json!("Make a Difference, One Task at a Time")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_falls_back_to_an_empty_list_with_a_notice() {
        let mut board = MockOpportunityBoard::new();
        board
            .expect_list()
            .return_once(|| Err(Error::internal(notices::FAILED_TO_LOAD_OPPORTUNITIES)));
        let app = pages_app!(mock_state(
            MockSessionProvider::new(),
            board,
            MockDashboard::new()
        ));

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/opportunities").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["opportunities"], json!([]));
        assert_eq!(body["notice"], json!("Failed to load opportunities"));
        assert_eq!(body["canApply"], json!(false));
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_lets_signed_in_users_apply() {
        let user = UserId::random();
        let stored = park_cleanup(&user);
        let mut board = MockOpportunityBoard::new();
        board.expect_list().return_once(move || Ok(vec![stored]));
        let app = pages_app!(mock_state(
            provider_knowing(&user),
            board,
            MockDashboard::new()
        ));
        let signed_in = test::call_service(&app, sign_in_request(&user).to_request()).await;
        let cookie = session_cookie(&signed_in).expect("session cookie");

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/opportunities")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["canApply"], json!(true));
        assert!(body.get("notice").is_none());
        assert_eq!(body["opportunities"][0]["badge"], json!("green"));
        assert_eq!(body["header"]["links"][1]["href"], json!("/dashboard"));
    }

    #[rstest]
    #[case("/dashboard", false, "/auth")]
    #[case("/auth", true, "/")]
    #[actix_web::test]
    async fn guarded_pages_redirect_with_see_other(
        #[case] path: &str,
        #[case] signed_in: bool,
        #[case] location: &str,
    ) {
        let user = UserId::random();
        let mut dashboard = MockDashboard::new();
        dashboard.expect_load().never();
        let app = pages_app!(mock_state(
            provider_knowing(&user),
            MockOpportunityBoard::new(),
            dashboard
        ));
        let mut request = test::TestRequest::get().uri(path);
        if signed_in {
            let response = test::call_service(&app, sign_in_request(&user).to_request()).await;
            request = request.cookie(session_cookie(&response).expect("session cookie"));
        }

        let response = test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some(location)
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn dashboard_falls_back_to_empty_lists_with_a_notice() {
        let user = UserId::random();
        let mut dashboard = MockDashboard::new();
        dashboard
            .expect_load()
            .return_once(|_| Err(Error::internal(notices::FAILED_TO_LOAD_DATA)));
        let app = pages_app!(mock_state(
            provider_knowing(&user),
            MockOpportunityBoard::new(),
            dashboard
        ));
        let signed_in = test::call_service(&app, sign_in_request(&user).to_request()).await;
        let cookie = session_cookie(&signed_in).expect("session cookie");

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["opportunities"], json!([]));
        assert_eq!(body["applications"], json!([]));
        assert_eq!(body["notice"], json!("Failed to load data"));
        assert_eq!(body["form"]["mode"], json!("create"));
    }

    #[rstest]
    #[actix_web::test]
    async fn dashboard_renders_owned_opportunities() {
        let user = UserId::random();
        let owned = park_cleanup(&user);
        let mut dashboard = MockDashboard::new();
        dashboard.expect_load().return_once(move |_| {
            Ok(DashboardData {
                opportunities: vec![owned],
                applications: Vec::new(),
            })
        });
        let app = pages_app!(mock_state(
            provider_knowing(&user),
            MockOpportunityBoard::new(),
            dashboard
        ));
        let signed_in = test::call_service(&app, sign_in_request(&user).to_request()).await;
        let cookie = session_cookie(&signed_in).expect("session cookie");

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["copy"]["heading"], json!("Dashboard"));
        assert_eq!(body["opportunities"][0]["title"], json!("Park Cleanup"));
        assert_eq!(body["header"]["user"]["displayName"], json!("Ada Lovelace"));
    }

    #[rstest]
    #[actix_web::test]
    async fn auth_page_offers_both_modes() {
        let app = pages_app!(mock_state(
            MockSessionProvider::new(),
            MockOpportunityBoard::new(),
            MockDashboard::new()
        ));

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/auth").to_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["copy"]["signIn"]["submitLabel"], json!("Sign In"));
        assert_eq!(
            body["copy"]["signUp"]["fields"],
            json!(["fullName", "email", "password"])
        );
    }
}
