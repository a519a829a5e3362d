//! Driving port for authentication and session state.
//!
//! Inbound adapters resolve, establish and end sessions through this port
//! and never see accounts, hashes or mail delivery.

use async_trait::async_trait;

use crate::domain::{
    ClientId, Credentials, Error, Session, SessionSubscription, SignUpDetails, SignUpOutcome,
    UserId, VerificationToken,
};

/// The single authority on who is signed in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve a stored user id to a session. Unknown or unconfirmed
    /// accounts resolve to `None`.
    async fn current_session(&self, user_id: &UserId) -> Result<Option<Session>, Error>;

    /// Observe session changes for one browser. Dropping the handle
    /// unsubscribes.
    fn subscribe(&self, client: ClientId) -> SessionSubscription;

    /// Verify credentials. Nothing is announced until the caller has
    /// stored the session and calls [`Self::announce_sign_in`].
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, Error>;

    /// Tell `client`'s header sockets about an established session.
    fn announce_sign_in(&self, client: ClientId, session: &Session);

    /// Register an unconfirmed account and send its verification link.
    async fn sign_up(&self, details: &SignUpDetails) -> Result<SignUpOutcome, Error>;

    /// Redeem a verification token.
    async fn confirm_email(&self, token: &VerificationToken) -> Result<(), Error>;

    /// Announce the end of the session to `client`.
    async fn sign_out(&self, client: ClientId) -> Result<(), Error>;
}
