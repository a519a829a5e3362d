//! WebSocket inbound adapter pushing header views on session changes.
//!
//! Responsibilities:
//! - validate upgrade requests (origin allow-list)
//! - subscribe to the browser's session changes before the upgrade completes
//! - keep WebSocket-specific concerns at the edge of the system

use actix_web::web::{self, Payload};
use actix_web::{
    HttpRequest, HttpResponse, get,
    http::header::{HeaderValue, ORIGIN},
};
use tracing::{error, warn};
use url::Url;

use crate::domain::TraceId;
use crate::inbound::http::session::SessionContext;
use crate::inbound::ws::state::OriginPolicy;

mod session;

pub mod messages;
pub mod state;

/// Handle WebSocket upgrade for the `/ws/session` endpoint.
#[get("/ws/session")]
pub async fn ws_entry(
    state: web::Data<state::WsState>,
    cookie: SessionContext,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let mut origin_iter = req.headers().get_all(ORIGIN);
    let origin_header = origin_iter.next().ok_or_else(|| {
        error!("Missing Origin header on WebSocket upgrade");
        actix_web::error::ErrorForbidden("Origin not allowed")
    })?;
    if origin_iter.next().is_some() {
        error!("Multiple Origin headers on WebSocket upgrade");
        return Err(actix_web::error::ErrorBadRequest("Invalid Origin header"));
    }

    validate_origin(&state.origins, origin_header)?;

    let client = cookie.client_id()?;
    // Subscribe first so a change racing the initial render is not lost.
    let subscription = state.session.subscribe(client);
    let current = cookie.resolve(state.session.as_ref()).await?;

    let (response, ws_session, messages) = actix_ws::handle(&req, stream).map_err(|error| {
        error!(error = %error, "WebSocket upgrade failed");
        actix_web::error::ErrorInternalServerError("WebSocket upgrade failed")
    })?;
    actix_web::rt::spawn(TraceId::inherit(session::handle_ws_session(
        subscription,
        current,
        ws_session,
        messages,
    )));
    Ok(response)
}

fn validate_origin(policy: &OriginPolicy, origin_header: &HeaderValue) -> actix_web::Result<()> {
    let origin_value = match origin_header.to_str() {
        Ok(value) => value,
        Err(error) => {
            error!(error = %error, "Failed to parse Origin header as string");
            return Err(actix_web::error::ErrorBadRequest("Invalid Origin header"));
        }
    };

    let origin = Url::parse(origin_value).map_err(|error| {
        error!(error = %error, "Failed to parse Origin header as URL");
        actix_web::error::ErrorBadRequest("Invalid Origin header")
    })?;

    if policy.allows(&origin) {
        Ok(())
    } else {
        warn!(
            origin = origin_value,
            "Rejected WS upgrade due to disallowed Origin"
        );
        Err(actix_web::error::ErrorForbidden("Origin not allowed"))
    }
}
