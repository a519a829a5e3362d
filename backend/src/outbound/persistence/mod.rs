//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types; no business rules live here.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures are mapped to the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use community::outbound::persistence::{DbPool, PoolConfig, DieselOpportunityRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/community")).await?;
//! let repo = DieselOpportunityRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_application_repository;
mod diesel_basic_error_mapping;
mod diesel_opportunity_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_opportunity_repository::DieselOpportunityRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
