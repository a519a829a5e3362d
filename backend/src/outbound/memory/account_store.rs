//! Accounts held in process memory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, EmailAddress, NewAccount, UserId};

use super::lock;

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, Account>,
    /// Pending verification digests keyed to their account.
    pending: HashMap<String, UserId>,
}

/// In-memory `AccountRepository`.
#[derive(Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<Accounts>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAccountRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Accounts::default())),
            clock,
        }
    }

    /// Digest awaiting confirmation for `email`, if any.
    ///
    /// Lets local demos and tests complete sign-up without a mailbox.
    pub fn pending_digest(&self, email: &EmailAddress) -> Option<String> {
        let accounts = lock(&self.accounts);
        accounts
            .pending
            .iter()
            .find(|(_, user)| {
                accounts
                    .by_id
                    .get(*user)
                    .is_some_and(|account| account.email == *email)
            })
            .map(|(digest, _)| digest.clone())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut accounts = lock(&self.accounts);
        if accounts
            .by_id
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AccountRepositoryError::duplicate_email());
        }
        let stored = Account {
            user_id: account.user_id.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            password_hash: account.password_hash.clone(),
            email_confirmed_at: None,
            created_at: self.clock.utc(),
        };
        accounts
            .pending
            .insert(account.verification_digest.clone(), stored.user_id.clone());
        accounts.by_id.insert(stored.user_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = lock(&self.accounts);
        Ok(accounts
            .by_id
            .values()
            .find(|account| account.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(lock(&self.accounts).by_id.get(id).cloned())
    }

    async fn confirm_email(
        &self,
        verification_digest: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<Option<UserId>, AccountRepositoryError> {
        let mut accounts = lock(&self.accounts);
        let Some(user_id) = accounts.pending.remove(verification_digest) else {
            return Ok(None);
        };
        if let Some(account) = accounts.by_id.get_mut(&user_id) {
            account.email_confirmed_at = Some(confirmed_at);
        }
        Ok(Some(user_id))
    }
}
