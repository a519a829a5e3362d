//! Live server harness for the volunteer journey scenarios.
//!
//! The server runs over the in-memory adapters inside a single-threaded Tokio
//! runtime plus a `LocalSet`, because Actix uses `spawn_local` internally.
//! Each named browser keeps its own session cookie. `WorldFixture` stops the
//! server even if a step panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::{BoxedSocket, Client, ws::Codec};
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use url::Url;

use community::Trace;
use community::inbound::http::auth::{current_session, sign_in, sign_out, sign_up, verify_email};
use community::inbound::http::dashboard::{get_dashboard, get_form, submit_form};
use community::inbound::http::opportunities::{
    apply, create_opportunity, delete_opportunity, list_opportunities, update_opportunity,
};
use community::inbound::http::pages::{auth_page, dashboard_page, landing_page, listing_page};
use community::inbound::http::session_config::SessionSettings;
use community::inbound::ws;
use community::test_support::{InMemoryStack, RecordingMailer};

pub(crate) const PUBLIC_URL: &str = "http://localhost:8080";
pub(crate) const LOCAL_ORIGIN: &str = "http://localhost:3000";

pub(crate) type HeaderSocket = actix_codec::Framed<BoxedSocket, Codec>;

/// Outcome of the last HTTP exchange.
#[derive(Debug, Default)]
pub(crate) struct LastResponse {
    pub(crate) status: u16,
    pub(crate) location: Option<String>,
    pub(crate) body: Value,
}

pub(crate) struct JourneyWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) mailer: RecordingMailer,
    pub(crate) cookies: HashMap<String, String>,
    pub(crate) opportunity_id: Option<String>,
    pub(crate) last: LastResponse,
    pub(crate) header_socket: Option<HeaderSocket>,
    pub(crate) last_header: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<JourneyWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let mut ctx = self.world.borrow_mut();
        ctx.header_socket = None;
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Drive `operation` on the world's runtime. The future must not borrow the
/// world.
pub(crate) fn block_on<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// A request sent from one named browser.
pub(crate) struct BrowserRequest<'a> {
    pub(crate) browser: &'a str,
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) payload: Option<Value>,
}

/// Send `request` with the browser's cookie, store any refreshed cookie and
/// record the response.
pub(crate) fn send(world: &SharedWorld, request: BrowserRequest<'_>) {
    let BrowserRequest {
        browser,
        method,
        path,
        payload,
    } = request;
    let cookie = world.borrow().cookies.get(browser).cloned();
    let (last, set_cookie) = block_on(world, |base_url| async move {
        let mut request = Client::builder()
            .disable_redirects()
            .finish()
            .request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await,
            None => request.send().await,
        }
        .expect("request should reach the server");
        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let location = header_text(header::LOCATION);
        let set_cookie = header_text(header::SET_COOKIE);
        let status = response.status().as_u16();
        let bytes = response.body().await.expect("response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (
            LastResponse {
                status,
                location,
                body,
            },
            set_cookie,
        )
    });

    let mut ctx = world.borrow_mut();
    if let Some(pair) = set_cookie.as_deref().and_then(|value| value.split(';').next()) {
        ctx.cookies.insert(browser.to_owned(), pair.to_owned());
    }
    ctx.last = last;
}

fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

async fn spawn_server(stack: &InMemoryStack) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(stack.http.clone());
    let ws_data = web::Data::new(stack.ws.clone());
    let session = Arc::new(session_settings());

    let server = HttpServer::new(move || {
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

        App::new()
            .app_data(http_data.clone())
            .app_data(ws_data.clone())
            .wrap(session.middleware())
            .wrap(Trace)
            .service(landing_page)
            .service(listing_page)
            .service(dashboard_page)
            .service(auth_page)
            .service(api)
            .service(ws::ws_entry)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let stack = InMemoryStack::new(&Url::parse(PUBLIC_URL).expect("public url"));
    let mailer = stack.mailer.clone();

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(&stack).await })
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(JourneyWorld {
            runtime,
            local,
            base_url,
            server,
            mailer,
            cookies: HashMap::new(),
            opportunity_id: None,
            last: LastResponse::default(),
            header_socket: None,
            last_header: None,
        })),
    }
}
