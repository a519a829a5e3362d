//! Shared WebSocket adapter state.
//!
//! The header socket depends on the session provider port only, so tests
//! can drive it with a mock provider backed by a real event bus.

use std::sync::Arc;

use url::{Origin, Url};

use crate::domain::ports::SessionProvider;

const LOCALHOST: &str = "localhost";

/// Origins allowed to open the header socket.
///
/// Accepts the origin of the public URL and plain HTTP from localhost with a
/// non-zero explicit port.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    public: Origin,
}

impl OriginPolicy {
    pub fn new(public_url: &Url) -> Self {
        Self {
            public: public_url.origin(),
        }
    }

    pub fn allows(&self, origin: &Url) -> bool {
        if origin.origin() == self.public && self.public.is_tuple() {
            return true;
        }
        match (origin.scheme(), origin.host_str()) {
            ("http", Some(LOCALHOST)) => matches!(origin.port(), Some(port) if port != 0),
            _ => false,
        }
    }
}

/// Dependency bundle for WebSocket handlers.
#[derive(Clone)]
pub struct WsState {
    pub session: Arc<dyn SessionProvider>,
    pub origins: OriginPolicy,
}

impl WsState {
    /// Construct state from explicit port implementations.
    pub fn new(session: Arc<dyn SessionProvider>, origins: OriginPolicy) -> Self {
        Self { session, origins }
    }
}
