//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the HTTP surface. It registers:
//!
//! - **Paths**: page views, the `/api/v1` JSON API and the health probes
//! - **Schemas**: view DTOs plus domain type wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`]) that describe domain types without coupling them
//!   to utoipa
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{SignInRequest, SignUpRequest};
use crate::inbound::http::dashboard::{OpportunityFormRequest, SubmissionResponse};
use crate::inbound::http::health::{ProbeBody, StoreBackend};
use crate::inbound::http::opportunities::{ApplyResponse, DeleteResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::views::{
    ApplicationSummary, ApplicationView, DashboardView, NoticeResponse, OpportunityFormView,
    OpportunityView, SessionUserView, SessionView,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/auth/sign-in.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP surface.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Community volunteer board API",
        description = "Page views, the JSON API for opportunities, applications and \
            sessions, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::pages::landing_page,
        crate::inbound::http::pages::listing_page,
        crate::inbound::http::pages::dashboard_page,
        crate::inbound::http::pages::auth_page,
        crate::inbound::http::opportunities::list_opportunities,
        crate::inbound::http::opportunities::apply,
        crate::inbound::http::opportunities::create_opportunity,
        crate::inbound::http::opportunities::update_opportunity,
        crate::inbound::http::opportunities::delete_opportunity,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::dashboard::get_form,
        crate::inbound::http::dashboard::submit_form,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::verify_email,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        OpportunityView,
        ApplicationSummary,
        ApplicationView,
        DashboardView,
        OpportunityFormView,
        OpportunityFormRequest,
        SubmissionResponse,
        ApplyResponse,
        DeleteResponse,
        SignInRequest,
        SignUpRequest,
        NoticeResponse,
        SessionView,
        SessionUserView,
        ProbeBody,
        StoreBackend,
    )),
    tags(
        (name = "pages", description = "Page view models for the client shell"),
        (name = "opportunities", description = "Browse, apply to and manage opportunities"),
        (name = "dashboard", description = "The signed-in user's lists and form"),
        (name = "auth", description = "Sign in, sign up, sign out and email verification"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn opportunity_view_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let view = schemas.get("OpportunityView").expect("OpportunityView schema");

        assert_object_schema_has_field(view, "peopleNeeded");
        assert_object_schema_has_field(view, "badge");
    }

    #[rstest]
    #[case("/")]
    #[case("/dashboard")]
    #[case("/api/v1/opportunities")]
    #[case("/api/v1/opportunities/{id}/applications")]
    #[case("/api/v1/dashboard/form")]
    #[case("/api/v1/auth/sign-in")]
    #[case("/api/v1/session")]
    #[case("/health/ready")]
    fn registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn declares_the_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
