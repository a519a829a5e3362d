//! Port for delivering email verification links.

use async_trait::async_trait;

use crate::domain::{DisplayName, EmailAddress, VerificationToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail delivery adapters.
    pub enum VerificationMailerError {
        /// The message could not be handed to the transport.
        Delivery { message: String } => "verification email delivery failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    /// Send the one-time verification link for a new account.
    async fn send_verification(
        &self,
        email: &EmailAddress,
        display_name: &DisplayName,
        token: &VerificationToken,
    ) -> Result<(), VerificationMailerError>;
}
