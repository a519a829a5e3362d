//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable with mocks or in-memory adapters.

use std::sync::Arc;

use crate::domain::ports::{Dashboard, OpportunityBoard, SessionProvider};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub session: Arc<dyn SessionProvider>,
    pub board: Arc<dyn OpportunityBoard>,
    pub dashboard: Arc<dyn Dashboard>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use community::domain::{
    ///     AccountService, DashboardService, OpportunityBoardService, SessionEventBus,
    /// };
    /// use community::inbound::http::state::HttpState;
    /// use community::outbound::memory::{InMemoryAccountRepository, InMemoryBoardStore};
    /// use community::outbound::{Argon2Hasher, LogMailer};
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(InMemoryBoardStore::new(clock.clone()));
    /// let accounts = Arc::new(InMemoryAccountRepository::new(clock.clone()));
    /// let mailer = LogMailer::new("http://localhost:8080".parse().expect("url"));
    /// let state = HttpState::new(
    ///     Arc::new(AccountService::new(
    ///         accounts,
    ///         Arc::new(Argon2Hasher::new()),
    ///         Arc::new(mailer),
    ///         SessionEventBus::new(),
    ///         clock,
    ///     )),
    ///     Arc::new(OpportunityBoardService::new(store.clone(), store.clone())),
    ///     Arc::new(DashboardService::new(store.clone(), store)),
    /// );
    /// let _board = state.board.clone();
    /// ```
    pub fn new(
        session: Arc<dyn SessionProvider>,
        board: Arc<dyn OpportunityBoard>,
        dashboard: Arc<dyn Dashboard>,
    ) -> Self {
        Self {
            session,
            board,
            dashboard,
        }
    }
}
