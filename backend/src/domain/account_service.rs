//! Account-backed session provider.
//!
//! Sign-up stores an unconfirmed account and mails a one-time token. Sign-in
//! verifies the password hash and refuses unconfirmed accounts. Session
//! transitions are announced on the [`SessionEventBus`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, CredentialHasher, CredentialHasherError,
    SessionProvider, VerificationMailer,
};
use crate::domain::{
    ClientId, Credentials, Error, NewAccount, Session, SessionChange, SessionEventBus,
    SessionSubscription, SignUpDetails, SignUpOutcome, UserId, VerificationToken, notices,
};

/// Session provider implementing [`SessionProvider`] over driven ports.
#[derive(Clone)]
pub struct AccountService<A, H, M> {
    accounts: Arc<A>,
    hasher: Arc<H>,
    mailer: Arc<M>,
    events: SessionEventBus,
    clock: Arc<dyn Clock>,
}

impl<A, H, M> AccountService<A, H, M> {
    pub fn new(
        accounts: Arc<A>,
        hasher: Arc<H>,
        mailer: Arc<M>,
        events: SessionEventBus,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            mailer,
            events,
            clock,
        }
    }

    /// Event bus shared with subscribers.
    pub fn events(&self) -> &SessionEventBus {
        &self.events
    }
}

fn map_account_error(error: AccountRepositoryError) -> Error {
    error!(%error, "account repository failure");
    match error {
        AccountRepositoryError::Connection { .. } => {
            Error::service_unavailable("Authentication is temporarily unavailable")
        }
        AccountRepositoryError::Query { .. } => Error::internal("Authentication failed"),
        AccountRepositoryError::DuplicateEmail => {
            Error::conflict(notices::USER_ALREADY_REGISTERED)
        }
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    error!(%error, "credential hasher failure");
    Error::internal("Authentication failed")
}

impl<A, H, M> AccountService<A, H, M>
where
    A: AccountRepository,
    H: CredentialHasher,
    M: VerificationMailer,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, Error> {
        let account = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| Error::unauthorized(notices::INVALID_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(notices::INVALID_CREDENTIALS));
        }
        if !account.is_confirmed() {
            return Err(Error::unauthorized(notices::EMAIL_NOT_CONFIRMED));
        }
        Ok(account.to_session())
    }
}

#[async_trait]
impl<A, H, M> SessionProvider for AccountService<A, H, M>
where
    A: AccountRepository,
    H: CredentialHasher,
    M: VerificationMailer,
{
    async fn current_session(&self, user_id: &UserId) -> Result<Option<Session>, Error> {
        let account = self
            .accounts
            .find_by_id(user_id)
            .await
            .map_err(map_account_error)?;
        Ok(account
            .filter(|account| account.is_confirmed())
            .map(|account| account.to_session()))
    }

    fn subscribe(&self, client: ClientId) -> SessionSubscription {
        self.events.subscribe(client)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, Error> {
        let session = self.authenticate(credentials).await?;
        info!(user_id = %session.user_id(), "user signed in");
        Ok(session)
    }

    fn announce_sign_in(&self, client: ClientId, session: &Session) {
        self.events
            .publish(client, SessionChange::SignedIn(session.clone()));
    }

    async fn sign_up(&self, details: &SignUpDetails) -> Result<SignUpOutcome, Error> {
        let credentials = details.credentials();
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hasher_error)?;
        let token = VerificationToken::generate();
        let account = NewAccount {
            user_id: UserId::random(),
            email: credentials.email().clone(),
            display_name: details.display_name().clone(),
            password_hash,
            verification_digest: token.digest(),
        };

        let stored = self
            .accounts
            .insert(&account)
            .await
            .map_err(map_account_error)?;

        self.mailer
            .send_verification(&stored.email, &stored.display_name, &token)
            .await
            .map_err(|error| {
                error!(%error, user_id = %stored.user_id, "verification email not sent");
                Error::service_unavailable("Unable to send the verification email")
            })?;

        info!(user_id = %stored.user_id, "account created; awaiting email confirmation");
        Ok(SignUpOutcome {
            user_id: stored.user_id,
            email: stored.email,
        })
    }

    async fn confirm_email(&self, token: &VerificationToken) -> Result<(), Error> {
        let confirmed = self
            .accounts
            .confirm_email(&token.digest(), self.clock.utc())
            .await
            .map_err(map_account_error)?;
        match confirmed {
            Some(user_id) => {
                info!(%user_id, "email confirmed");
                Ok(())
            }
            None => Err(Error::not_found(notices::INVALID_VERIFICATION_LINK)),
        }
    }

    async fn sign_out(&self, client: ClientId) -> Result<(), Error> {
        self.events.publish(client, SessionChange::SignedOut);
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
