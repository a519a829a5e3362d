//! Builders for the HTTP and WebSocket states over either adapter family.
//!
//! Both families share one clock, one password hasher, one mailer and one
//! session event bus, so a sign-in over HTTP reaches every header socket of
//! the same browser.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use community::domain::ports::{AccountRepository, ApplicationRepository, OpportunityRepository};
use community::domain::{
    AccountService, DashboardService, OpportunityBoardService, SessionEventBus,
};
use community::inbound::http::health::StoreBackend;
use community::inbound::http::state::HttpState;
use community::inbound::ws::state::{OriginPolicy, WsState};
use community::outbound::memory::{InMemoryAccountRepository, InMemoryBoardStore};
use community::outbound::persistence::{
    DieselAccountRepository, DieselApplicationRepository, DieselOpportunityRepository,
};
use community::outbound::{Argon2Hasher, LogMailer};

use super::ServerConfig;

/// Handler states built for one server instance.
pub(crate) struct States {
    pub(crate) http: HttpState,
    pub(crate) ws: WsState,
}

/// Which adapter family `config` selects.
pub(crate) fn store_backend(config: &ServerConfig) -> StoreBackend {
    if config.db_pool.is_some() {
        StoreBackend::Postgres
    } else {
        StoreBackend::Memory
    }
}

/// Build the handler states, using Diesel repositories when a pool is
/// configured and the in-memory stores otherwise.
pub(crate) fn build_states(config: &ServerConfig) -> States {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let shared = Shared {
        mailer: Arc::new(LogMailer::new(config.public_url.clone())),
        origins: OriginPolicy::new(&config.public_url),
        clock: clock.clone(),
    };

    match &config.db_pool {
        Some(pool) => {
            info!("wiring PostgreSQL adapters");
            wire(
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DieselOpportunityRepository::new(pool.clone())),
                Arc::new(DieselApplicationRepository::new(pool.clone())),
                shared,
            )
        }
        None => {
            info!("no database configured; data is kept in memory");
            let board = Arc::new(InMemoryBoardStore::new(clock.clone()));
            wire(
                Arc::new(InMemoryAccountRepository::new(clock)),
                board.clone(),
                board,
                shared,
            )
        }
    }
}

struct Shared {
    mailer: Arc<LogMailer>,
    origins: OriginPolicy,
    clock: Arc<dyn Clock>,
}

fn wire<A, O, P>(accounts: Arc<A>, opportunities: Arc<O>, applications: Arc<P>, shared: Shared) -> States
where
    A: AccountRepository + 'static,
    O: OpportunityRepository + 'static,
    P: ApplicationRepository + 'static,
{
    let Shared {
        mailer,
        origins,
        clock,
    } = shared;
    let session = Arc::new(AccountService::new(
        accounts,
        Arc::new(Argon2Hasher::new()),
        mailer,
        SessionEventBus::new(),
        clock,
    ));
    let http = HttpState::new(
        session.clone(),
        Arc::new(OpportunityBoardService::new(
            opportunities.clone(),
            applications.clone(),
        )),
        Arc::new(DashboardService::new(opportunities, applications)),
    );
    States {
        http,
        ws: WsState::new(session, origins),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use community::domain::UserId;
    use community::inbound::http::session_config::SessionSettings;
    use rstest::rstest;
    use url::Url;

    fn memory_config() -> ServerConfig {
        ServerConfig::new(
            SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            "127.0.0.1:0".parse().expect("bind addr"),
            Url::parse("https://community.example").expect("public url"),
        )
    }

    #[rstest]
    fn memory_config_reports_the_memory_backend() {
        assert_eq!(store_backend(&memory_config()), StoreBackend::Memory);
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_states_start_empty() {
        let states = build_states(&memory_config());

        let listed = states.http.board.list().await.expect("listing");
        let session = states
            .http
            .session
            .current_session(&UserId::random())
            .await
            .expect("session lookup");

        assert!(listed.is_empty());
        assert!(session.is_none());
    }

    #[rstest]
    fn origin_policy_follows_the_public_url() {
        let states = build_states(&memory_config());

        assert!(
            states
                .ws
                .origins
                .allows(&Url::parse("https://community.example").expect("origin"))
        );
        assert!(
            !states
                .ws
                .origins
                .allows(&Url::parse("https://evil.example").expect("origin"))
        );
    }
}
