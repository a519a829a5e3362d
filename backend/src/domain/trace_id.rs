//! Correlation identifier carried by every request.
//!
//! The [`crate::Trace`] middleware mints one [`TraceId`] per request and
//! runs the handler inside [`TraceId::scope`]. Domain errors read it back
//! with [`TraceId::current`] so payloads and logs share the same value.
//! Task-locals do not cross `spawn`; wrap spawned futures with
//! [`TraceId::inherit`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request across logs, errors and spawned tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use community::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id = TraceId::generate();
    /// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Bind the caller's identifier to `fut` so it survives a `spawn`.
    ///
    /// The identifier is captured when this is called, not when the returned
    /// future is first polled. Outside a request the future runs unscoped.
    pub fn inherit<F: Future>(fut: F) -> impl Future<Output = F::Output> {
        let trace_id = Self::current();
        async move {
            match trace_id {
                Some(trace_id) => CURRENT.scope(trace_id, fut).await,
                None => fut.await,
            }
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
