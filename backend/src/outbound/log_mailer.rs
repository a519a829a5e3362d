//! Verification mailer that writes the link to the structured log.
//!
//! Used for local runs and tests; production deployments swap in a real
//! transport behind the same port.

use async_trait::async_trait;
use tracing::info;
use url::Url;

use crate::domain::ports::{VerificationMailer, VerificationMailerError};
use crate::domain::{DisplayName, EmailAddress, VerificationToken};

/// Path of the endpoint that redeems verification tokens.
pub const VERIFY_PATH: &str = "/api/v1/auth/verify";

/// Logs verification links instead of sending them.
#[derive(Debug, Clone)]
pub struct LogMailer {
    public_url: Url,
}

impl LogMailer {
    pub fn new(public_url: Url) -> Self {
        Self { public_url }
    }

    /// Absolute verification link carrying `token`.
    pub fn verification_link(
        &self,
        token: &VerificationToken,
    ) -> Result<Url, VerificationMailerError> {
        let mut link = self
            .public_url
            .join(VERIFY_PATH)
            .map_err(|err| VerificationMailerError::delivery(err.to_string()))?;
        link.query_pairs_mut().append_pair("token", token.expose());
        Ok(link)
    }
}

#[async_trait]
impl VerificationMailer for LogMailer {
    async fn send_verification(
        &self,
        email: &EmailAddress,
        display_name: &DisplayName,
        token: &VerificationToken,
    ) -> Result<(), VerificationMailerError> {
        let link = self.verification_link(token)?;
        info!(%email, %display_name, link = %link, "verification email queued");
        Ok(())
    }
}
