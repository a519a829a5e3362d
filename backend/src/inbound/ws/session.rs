//! Per-connection header socket.
//!
//! Sends the header for the current session on connect, then a fresh one
//! for every session change of this browser. The connection owns exactly
//! one subscription, released when the handler returns. The public
//! contract pings every 5s and considers a connection idle after 10s
//! without client traffic; tests shorten both intervals.

use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::time;
use tracing::{debug, warn};

use crate::domain::{Session as UserSession, SessionChange, SessionSubscription};
use crate::inbound::ws::messages::ServerMessage;

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_ws_session(
    subscription: SessionSubscription,
    current: Option<UserSession>,
    session: Session,
    stream: MessageStream,
) {
    WsSession { subscription }
        .run(current, session, stream)
        .await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    UnexpectedPayload,
    ProviderGone,
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    subscription: SessionSubscription,
}

impl WsSession {
    async fn run(
        mut self,
        current: Option<UserSession>,
        mut session: Session,
        mut stream: MessageStream,
    ) {
        let client = self.subscription.client();
        if let Err(error) = send_header(&mut session, current.as_ref()).await {
            warn!(%client, error = %error, "failed to send initial header");
            return;
        }

        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                message = stream.recv() => {
                    handle_stream_message(&mut session, &mut last_heartbeat, message).await
                }
                change = self.subscription.next() => {
                    handle_session_change(&mut session, change).await
                }
            };

            if let Err(error) = result {
                log_shutdown_reason(&error);
                close_session_if_needed(session, close_action_for(&error)).await;
                debug!(%client, "header socket finished");
                return;
            }
        }
    }
}

async fn send_header(session: &mut Session, current: Option<&UserSession>) -> Result<(), Closed> {
    match serde_json::to_string(&ServerMessage::header_for(current)) {
        Ok(body) => session.text(body).await,
        Err(error) => {
            warn!(error = %error, "Failed to serialise WebSocket payload");
            Ok(())
        }
    }
}

async fn handle_session_change(
    session: &mut Session,
    change: Option<SessionChange>,
) -> Result<(), SessionError> {
    let Some(change) = change else {
        return Err(SessionError::ProviderGone);
    };
    send_header(session, change.session())
        .await
        .map_err(SessionError::Network)
}

async fn handle_heartbeat_tick(
    session: &mut Session,
    last_heartbeat: &Instant,
) -> Result<(), SessionError> {
    if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
        return Err(SessionError::HeartbeatTimeout);
    }

    session.ping(b"").await.map_err(SessionError::Network)
}

async fn handle_stream_message(
    session: &mut Session,
    last_heartbeat: &mut Instant,
    message: Option<Result<Message, ProtocolError>>,
) -> Result<(), SessionError> {
    let Some(message) = message else {
        return Err(SessionError::StreamClosed);
    };

    match message {
        Ok(message) => handle_message(session, last_heartbeat, message).await,
        Err(error) => Err(SessionError::Protocol(error)),
    }
}

async fn handle_message(
    session: &mut Session,
    last_heartbeat: &mut Instant,
    message: Message,
) -> Result<(), SessionError> {
    match message {
        Message::Ping(payload) => {
            *last_heartbeat = Instant::now();
            session
                .pong(&payload)
                .await
                .map_err(SessionError::Network)
        }
        // The socket is push-only.
        Message::Text(_) | Message::Binary(_) => {
            warn!("Rejected client payload on header socket");
            Err(SessionError::UnexpectedPayload)
        }
        Message::Pong(_) | Message::Continuation(_) | Message::Nop => {
            *last_heartbeat = Instant::now();
            Ok(())
        }
        Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
    }
}

fn log_shutdown_reason(error: &SessionError) {
    match error {
        SessionError::HeartbeatTimeout => {
            warn!("WebSocket heartbeat timeout; closing connection");
        }
        SessionError::Protocol(error) => {
            warn!(error = %error, "WebSocket protocol error");
        }
        SessionError::Network(error) => {
            warn!(error = %error, "WebSocket send failed; closing connection");
        }
        SessionError::ProviderGone => {
            warn!("session events ended; closing connection");
        }
        SessionError::UnexpectedPayload
        | SessionError::ClientClosed(_)
        | SessionError::StreamClosed => {}
    }
}

fn close_action_for(error: &SessionError) -> CloseAction {
    match error {
        SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionError::UnexpectedPayload => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Policy,
            description: Some("unexpected payload".to_owned()),
        })),
        SessionError::ProviderGone => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Away,
            description: Some("session events ended".to_owned()),
        })),
        SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
        SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
    }
}

async fn close_session_if_needed(session: Session, close_action: CloseAction) {
    if let CloseAction::Close(reason) = close_action {
        if let Err(error) = session.close(reason).await {
            warn!(error = %error, "Failed to close WebSocket session");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
