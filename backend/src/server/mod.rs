//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{build_states, store_backend};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use community::Trace;
#[cfg(debug_assertions)]
use community::doc::ApiDoc;
use community::inbound::http::auth::{current_session, sign_in, sign_out, sign_up, verify_email};
use community::inbound::http::dashboard::{get_dashboard, get_form, submit_form};
use community::inbound::http::health::{HealthState, live, ready};
use community::inbound::http::opportunities::{
    apply, create_opportunity, delete_opportunity, list_opportunities, update_opportunity,
};
use community::inbound::http::pages::{auth_page, dashboard_page, landing_page, listing_page};
use community::inbound::http::session_config::SessionSettings;
use community::inbound::http::state::HttpState;
use community::inbound::ws;
use community::inbound::ws::state::WsState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
    session: Arc<SessionSettings>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        ws_state,
        session,
    } = deps;

    let api = web::scope("/api/v1")
        .service(list_opportunities)
        .service(create_opportunity)
        .service(update_opportunity)
        .service(delete_opportunity)
        .service(apply)
        .service(get_dashboard)
        .service(get_form)
        .service(submit_form)
        .service(sign_in)
        .service(sign_up)
        .service(sign_out)
        .service(verify_email)
        .service(current_session);

    // Pages, the API and the header socket all read the browser cookie, so
    // the session middleware wraps the whole application.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .wrap(session.middleware())
        .wrap(Trace)
        .service(landing_page)
        .service(listing_page)
        .service(dashboard_page)
        .service(auth_page)
        .service(api)
        .service(ws::ws_entry)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with session, binding and store settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let states = build_states(&config);
    let http_state = web::Data::new(states.http);
    let ws_state = web::Data::new(states.ws);
    let ServerConfig {
        session,
        bind_addr,
        public_url: _,
        db_pool: _,
    } = config;
    let session = Arc::new(session);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            ws_state: ws_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Health state matching the adapters `config` selects.
pub fn health_state_for(config: &ServerConfig) -> web::Data<HealthState> {
    web::Data::new(HealthState::new(store_backend(config)))
}
