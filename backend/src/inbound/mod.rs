//! Inbound adapters (HTTP, WebSocket) that translate external requests into
//! domain port calls while keeping framework details at the edge.
//!
//! Page views and the JSON API live under [`http`]; the header socket that
//! pushes session changes lives under [`ws`].

pub mod http;
pub mod ws;
