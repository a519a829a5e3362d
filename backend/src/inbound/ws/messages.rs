//! Wire-level message definitions for the WebSocket adapter.
//!
//! Session changes are rendered into these payloads before being serialised
//! to JSON and sent to connected clients.

use serde::Serialize;

use crate::domain::{HeaderView, Session};

/// Outbound payloads pushed by the header socket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The header to render for the browser's current session.
    Header { header: HeaderView },
}

impl ServerMessage {
    pub fn header_for(session: Option<&Session>) -> Self {
        Self::Header {
            header: HeaderView::for_session(session),
        }
    }
}
