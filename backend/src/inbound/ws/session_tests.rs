//! Header socket tests.

use super::*;
use crate::domain::ports::MockSessionProvider;
use crate::domain::{ClientId, DisplayName, EmailAddress, SessionEventBus, SessionUser, UserId};
use crate::inbound::http::test_utils::test_session_middleware;
use crate::inbound::ws;
use crate::inbound::ws::state::{OriginPolicy, WsState};
use actix_web::{App, HttpServer, dev::ServerHandle, http::header};
use awc::{BoxedSocket, ws::Codec, ws::Frame, ws::Message};
use futures_util::{SinkExt, StreamExt};
use rstest::{fixture, rstest};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use url::Url;

type Socket = actix_codec::Framed<BoxedSocket, Codec>;

/// Running server plus the bus and the client ids it has seen subscribe.
struct Harness {
    url: String,
    bus: SessionEventBus,
    clients: Arc<Mutex<Vec<ClientId>>>,
    handle: ServerHandle,
}

impl Harness {
    fn subscribed_client(&self) -> ClientId {
        *self
            .clients
            .lock()
            .expect("clients lock")
            .last()
            .expect("a subscription was opened")
    }

    async fn connect(&self, origin: &str) -> Result<Socket, awc::error::WsClientError> {
        awc::Client::default()
            .ws(format!("{}/ws/session", self.url))
            .set_header(header::ORIGIN, origin)
            .connect()
            .await
            .map(|(_response, socket)| socket)
    }
}

#[fixture]
fn harness() -> Harness {
    let bus = SessionEventBus::new();
    let clients: Arc<Mutex<Vec<ClientId>>> = Arc::default();
    let mut provider = MockSessionProvider::new();
    let subscribe_bus = bus.clone();
    let seen = Arc::clone(&clients);
    provider.expect_subscribe().returning(move |client| {
        seen.lock().expect("clients lock").push(client);
        subscribe_bus.subscribe(client)
    });
    let ws_state = WsState::new(
        Arc::new(provider),
        OriginPolicy::new(&Url::parse("https://community.example").expect("public url")),
    );

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let server = HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(ws_state.clone()))
            .wrap(test_session_middleware())
            .service(ws::ws_entry)
    })
    .workers(1)
    .listen(listener)
    .expect("bind test server")
    .disable_signals()
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Harness {
        url: format!("http://{addr}"),
        bus,
        clients,
        handle,
    }
}

/// Next text frame, answering pings so the server keeps the socket open.
async fn next_text_frame(socket: &mut Socket) -> Value {
    loop {
        let frame = socket.next().await.expect("response frame").expect("frame");
        match frame {
            Frame::Text(bytes) => return serde_json::from_slice(&bytes).expect("json"),
            Frame::Ping(payload) => socket
                .send(Message::Pong(payload))
                .await
                .expect("send pong"),
            Frame::Pong(_) => continue,
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}

async fn next_close_reason(socket: &mut Socket) -> Option<CloseReason> {
    tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(frame) = socket.next().await {
            match frame.expect("frame") {
                Frame::Ping(_) | Frame::Pong(_) => continue,
                Frame::Close(reason) => return reason,
                other => panic!("unexpected frame before close: {other:?}"),
            }
        }
        None
    })
    .await
    .expect("close frame within timeout")
}

fn signed_in() -> UserSession {
    UserSession {
        user: SessionUser {
            id: UserId::random(),
            email: EmailAddress::new("ada@example.org").expect("email"),
            display_name: DisplayName::new("Ada Lovelace").expect("name"),
        },
    }
}

#[rstest]
#[actix_rt::test]
async fn sends_the_anonymous_header_on_connect(harness: Harness) {
    let mut socket = harness
        .connect("http://localhost:3000")
        .await
        .expect("websocket connect");

    let value = next_text_frame(&mut socket).await;

    assert_eq!(value["type"], "header");
    assert_eq!(value["header"]["links"][0]["href"], "/auth");
    assert_eq!(value["header"]["user"], Value::Null);
    harness.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn pushes_a_header_for_each_session_change(harness: Harness) {
    let mut socket = harness
        .connect("https://community.example")
        .await
        .expect("websocket connect");
    next_text_frame(&mut socket).await;
    let client = harness.subscribed_client();

    harness
        .bus
        .publish(client, SessionChange::SignedIn(signed_in()));
    let value = next_text_frame(&mut socket).await;
    assert_eq!(value["header"]["user"]["displayName"], "Ada Lovelace");
    assert_eq!(value["header"]["links"][1]["href"], "/dashboard");

    harness.bus.publish(client, SessionChange::SignedOut);
    let value = next_text_frame(&mut socket).await;
    assert_eq!(value["header"]["user"], Value::Null);
    harness.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn ignores_changes_for_other_browsers(harness: Harness) {
    let mut socket = harness
        .connect("http://localhost:3000")
        .await
        .expect("websocket connect");
    next_text_frame(&mut socket).await;
    let client = harness.subscribed_client();

    harness
        .bus
        .publish(ClientId::random(), SessionChange::SignedIn(signed_in()));
    harness.bus.publish(client, SessionChange::SignedOut);

    let value = next_text_frame(&mut socket).await;
    assert_eq!(value["header"]["user"], Value::Null);
    harness.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn releases_the_subscription_when_the_client_leaves(harness: Harness) {
    let mut socket = harness
        .connect("http://localhost:3000")
        .await
        .expect("websocket connect");
    next_text_frame(&mut socket).await;
    let client = harness.subscribed_client();
    assert_eq!(harness.bus.active_subscriptions(client), 1);

    socket
        .send(Message::Close(Some(CloseCode::Normal.into())))
        .await
        .expect("send close");
    drop(socket);

    let released = tokio::time::timeout(Duration::from_secs(2), async {
        while harness.bus.active_subscriptions(client) > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(released.is_ok(), "subscription still active");
    harness.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn closes_with_policy_on_client_payloads(harness: Harness) {
    let mut socket = harness
        .connect("http://localhost:3000")
        .await
        .expect("websocket connect");
    next_text_frame(&mut socket).await;

    socket
        .send(Message::Text("hello".into()))
        .await
        .expect("send text");

    let reason = next_close_reason(&mut socket).await.expect("close reason");
    assert_eq!(reason.code, CloseCode::Policy);
    harness.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn closes_after_timeout_without_client_messages(harness: Harness) {
    let mut socket = harness
        .connect("http://localhost:3000")
        .await
        .expect("websocket connect");
    tokio::time::sleep(CLIENT_TIMEOUT + HEARTBEAT_INTERVAL * 3).await;

    let reason = tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(frame) = socket.next().await {
            match frame.expect("frame") {
                Frame::Close(reason) => return reason,
                _ => continue,
            }
        }
        None
    })
    .await
    .expect("close frame within timeout")
    .expect("close reason");

    assert_eq!(reason.code, CloseCode::Normal);
    assert_eq!(reason.description.as_deref(), Some("heartbeat timeout"));
    harness.handle.stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn rejects_foreign_origins(harness: Harness) {
    let result = harness.connect("https://evil.example").await;

    assert!(result.is_err(), "upgrade should be refused");
    assert!(harness.clients.lock().expect("clients lock").is_empty());
    harness.handle.stop(false).await;
}
