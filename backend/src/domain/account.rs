//! Accounts owned by the session provider.
//!
//! An account is created unconfirmed at sign-up and becomes usable for sign
//! in once its verification token has been redeemed.

use chrono::{DateTime, Utc};

use super::auth::{Session, SessionUser};
use super::user::{DisplayName, EmailAddress, UserId};

/// Argon2 PHC string produced by a [`crate::domain::ports::CredentialHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// Insert request for a freshly signed-up account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    /// Hex SHA-256 digest of the emailed verification token.
    pub verification_digest: String,
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }

    /// Session view of this account.
    pub fn to_session(&self) -> Session {
        Session {
            user: SessionUser {
                id: self.user_id.clone(),
                email: self.email.clone(),
                display_name: self.display_name.clone(),
            },
        }
    }
}
