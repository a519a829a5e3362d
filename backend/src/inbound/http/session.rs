//! Cookie session helpers that keep handlers free of actix-session details.
//!
//! The cookie holds two values: the signed-in user's id and a per-browser
//! [`ClientId`] used to scope session change events. Everything else about
//! the session is resolved through the session provider on each request.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::SessionProvider;
use crate::domain::{ClientId, Error, Session, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const CLIENT_ID_KEY: &str = "client_id";

/// Where anonymous visitors are sent to sign in.
pub const SIGN_IN_PATH: &str = "/auth";

/// Newtype wrapper exposing the cookie session in domain terms.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Remember the signed-in user.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the signed-in user. The client id survives so an open header
    /// socket keeps receiving this browser's events.
    pub fn clear_user(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.renew();
    }

    /// User id stored in the cookie. Tampered values count as anonymous.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(stored.and_then(|raw| match UserId::new(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// This browser's client id, minted on first use.
    pub fn client_id(&self) -> Result<ClientId, Error> {
        let stored = self
            .0
            .get::<Uuid>(CLIENT_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        if let Some(uuid) = stored {
            return Ok(ClientId::from_uuid(uuid));
        }
        let client = ClientId::random();
        self.0
            .insert(CLIENT_ID_KEY, client.as_uuid())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(client)
    }

    /// Resolve the cookie to a live session. Accounts that no longer exist
    /// or are unconfirmed resolve to `None`.
    pub async fn resolve(&self, provider: &dyn SessionProvider) -> Result<Option<Session>, Error> {
        match self.user_id()? {
            Some(user_id) => provider.current_session(&user_id).await,
            None => Ok(None),
        }
    }

    /// Resolve the cookie or fail with `401` carrying `message` and a
    /// redirect hint to the sign-in page.
    pub async fn require(
        &self,
        provider: &dyn SessionProvider,
        message: &str,
    ) -> Result<Session, Error> {
        self.resolve(provider).await?.ok_or_else(|| {
            Error::unauthorized(message).with_details(json!({ "redirect": SIGN_IN_PATH }))
        })
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
