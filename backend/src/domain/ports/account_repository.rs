//! Port abstraction for account persistence used by the session provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Account, EmailAddress, NewAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// An account with this email already exists.
        DuplicateEmail => "an account with this email already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store an unconfirmed account.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Confirm the account holding `verification_digest` and clear the digest
    /// so the token cannot be redeemed twice. Returns the confirmed user.
    async fn confirm_email(
        &self,
        verification_digest: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<Option<UserId>, AccountRepositoryError>;
}
