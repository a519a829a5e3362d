//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod application_repository;
mod credential_hasher;
mod dashboard;
mod opportunity_board;
mod opportunity_repository;
mod session_provider;
mod verification_mailer;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use dashboard::MockDashboard;
pub use dashboard::{Dashboard, DashboardData, DeletedOpportunity, FormSubmission};
#[cfg(test)]
pub use opportunity_board::MockOpportunityBoard;
pub use opportunity_board::OpportunityBoard;
#[cfg(test)]
pub use opportunity_repository::MockOpportunityRepository;
pub use opportunity_repository::{
    OpportunityQuery, OpportunityRepository, OpportunityRepositoryError, SortOrder,
};
#[cfg(test)]
pub use session_provider::MockSessionProvider;
pub use session_provider::SessionProvider;
#[cfg(test)]
pub use verification_mailer::MockVerificationMailer;
pub use verification_mailer::{VerificationMailer, VerificationMailerError};
