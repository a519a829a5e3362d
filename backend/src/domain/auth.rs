//! Authentication primitives: credentials, sign-up details, sessions and the
//! session change events observed by the page header.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, UserId, UserValidationError};

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN_LEN: usize = 6;

const VERIFICATION_TOKEN_BYTES: usize = 32;

/// Domain error returned when auth payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email was missing or malformed.
    Email(UserValidationError),
    /// Full name was missing or malformed.
    DisplayName(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN_LEN`].
    PasswordTooShort { min: usize },
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(error) | Self::DisplayName(error) => write!(f, "{error}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "Password should be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is a normalised [`EmailAddress`].
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use community::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("Ada@Example.org", "hunter22").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email).map_err(AuthValidationError::Email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    credentials: Credentials,
    display_name: DisplayName,
}

impl SignUpDetails {
    /// Validate a sign-up request, enforcing the password length policy.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Self, AuthValidationError> {
        let credentials = Credentials::try_from_parts(email, password)?;
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AuthValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        let display_name = DisplayName::new(full_name).map_err(AuthValidationError::DisplayName)?;
        Ok(Self {
            credentials,
            display_name,
        })
    }

    /// Email and password pair.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Full name recorded on the account.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}

/// Opaque identifier for one browser, stored in its session cookie.
///
/// Session change events are scoped to a client so that signing out in one
/// browser only re-renders that browser's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh client identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in user as seen by pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
}

/// An established session. Absence of a session means anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    /// Identifier of the signed-in user.
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }
}

/// Session transitions published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(Session),
    SignedOut,
}

impl SessionChange {
    /// The session that is current after this change, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }
}

/// Result of a successful sign-up. No session is established until the
/// account's email has been confirmed and the user signs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user_id: UserId,
    pub email: EmailAddress,
}

/// One-time email verification token.
///
/// Only the SHA-256 digest is stored; the plain token travels in the email.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(Zeroizing<String>);

impl VerificationToken {
    /// Generate a random hex token.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; VERIFICATION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(Zeroizing::new(hex::encode(bytes)))
    }

    /// Wrap a token received from a verification link.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Plain token for inclusion in the verification link.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Hex-encoded SHA-256 digest used for storage and lookup.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationToken(**redacted**)")
    }
}
