//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and with the `test-support` feature.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use url::Url;

use crate::domain::ports::{VerificationMailer, VerificationMailerError};
use crate::domain::{
    AccountService, DashboardService, DisplayName, EmailAddress, OpportunityBoardService,
    SessionEventBus, VerificationToken,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::ws::state::{OriginPolicy, WsState};
use crate::outbound::Argon2Hasher;
use crate::outbound::memory::{InMemoryAccountRepository, InMemoryBoardStore};

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock pinned to 2024-05-01T09:00:00Z.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("fixture timestamp must be unambiguous"));
        Self::new(start)
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Mailer that keeps every verification token instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent token sent to `email`.
    pub fn token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl VerificationMailer for RecordingMailer {
    async fn send_verification(
        &self,
        email: &EmailAddress,
        _display_name: &DisplayName,
        token: &VerificationToken,
    ) -> Result<(), VerificationMailerError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((email.to_string(), token.expose().to_owned()));
        Ok(())
    }
}

/// Handler states over the in-memory adapters, with mail captured.
pub struct InMemoryStack {
    pub http: HttpState,
    pub ws: WsState,
    pub mailer: RecordingMailer,
    pub events: SessionEventBus,
}

impl InMemoryStack {
    /// Wire every port the way the server does without a database.
    pub fn new(public_url: &Url) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let board = Arc::new(InMemoryBoardStore::new(clock.clone()));
        let mailer = RecordingMailer::new();
        let events = SessionEventBus::new();
        let session = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::new(clock.clone())),
            Arc::new(Argon2Hasher::new()),
            Arc::new(mailer.clone()),
            events.clone(),
            clock,
        ));
        let http = HttpState::new(
            session.clone(),
            Arc::new(OpportunityBoardService::new(board.clone(), board.clone())),
            Arc::new(DashboardService::new(board.clone(), board)),
        );
        Self {
            http,
            ws: WsState::new(session, OriginPolicy::new(public_url)),
            mailer,
            events,
        }
    }
}
