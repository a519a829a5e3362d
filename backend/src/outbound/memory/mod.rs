//! In-process adapters used when no database is configured.
//!
//! These stores keep the same contracts as the Diesel adapters: the
//! `(opportunity_id, user_id)` application pair is unique, deleting an
//! opportunity removes its applications, and emails are unique per account.
//! State lives for the lifetime of the process only.

mod account_store;
mod board_store;

pub use account_store::InMemoryAccountRepository;
pub use board_store::InMemoryBoardStore;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `mutex`, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
