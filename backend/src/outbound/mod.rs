//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local stores used when no database is configured
//! - **argon2_hasher**: password hashing
//! - **log_mailer**: verification links written to the log
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod argon2_hasher;
pub mod log_mailer;
pub mod memory;
pub mod persistence;

pub use argon2_hasher::Argon2Hasher;
pub use log_mailer::{LogMailer, VERIFY_PATH};
