//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, DisplayName, EmailAddress, NewAccount, PasswordHash, UserId,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    if is_unique_violation(&error) {
        return AccountRepositoryError::duplicate_email();
    }
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let invalid = |field: &str, error: &dyn std::fmt::Display| {
        AccountRepositoryError::query(format!(
            "stored account {} has invalid {field}: {error}",
            row.user_id
        ))
    };
    let email = EmailAddress::new(&row.email).map_err(|error| invalid("email", &error))?;
    let display_name =
        DisplayName::new(&row.display_name).map_err(|error| invalid("display name", &error))?;
    Ok(Account {
        user_id: UserId::from_uuid(row.user_id),
        email,
        display_name,
        password_hash: PasswordHash::new(row.password_hash),
        email_confirmed_at: row.email_confirmed_at,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewAccountRow {
            user_id: *account.user_id.as_uuid(),
            email: account.email.as_ref(),
            display_name: account.display_name.as_ref(),
            password_hash: account.password_hash.as_str(),
            verification_digest: &account.verification_digest,
        };

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(&new_row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_account(row)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .find(*id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn confirm_email(
        &self,
        verification_digest: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<Option<UserId>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let confirmed: Option<uuid::Uuid> = diesel::update(
            accounts::table.filter(accounts::verification_digest.eq(verification_digest)),
        )
        .set((
            accounts::email_confirmed_at.eq(Some(confirmed_at)),
            accounts::verification_digest.eq(None::<String>),
        ))
        .returning(accounts::user_id)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        Ok(confirmed.map(UserId::from_uuid))
    }
}

#[cfg(test)]
mod tests {
    //! Row mapping coverage; queries run against PostgreSQL in deployment.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn row(email: &str) -> AccountRow {
        AccountRow {
            user_id: Uuid::new_v4(),
            email: email.to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            email_confirmed_at: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn maps_rows_to_accounts() {
        let account = row_to_account(row("ada@example.org")).expect("valid row");
        assert_eq!(account.email.as_ref(), "ada@example.org");
        assert!(!account.is_confirmed());
    }

    #[rstest]
    fn invalid_stored_email_is_a_query_error() {
        let err = row_to_account(row("not-an-email")).expect_err("invalid email");
        assert!(matches!(err, AccountRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violations_become_duplicate_email() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("accounts_email_key")),
        );
        assert_eq!(
            map_diesel_error(error),
            AccountRepositoryError::DuplicateEmail
        );
    }
}
