//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, CREDENTIAL_PROVIDER_ID, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::AccountRow;
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    AccountPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> AccountPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AccountPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            AccountPersistenceError::query("account constraint violated")
        }
        DieselFailure::Query(message) => AccountPersistenceError::query(message),
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_credential(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .filter(accounts::user_id.eq(user_id.as_uuid()))
            .filter(accounts::provider_id.eq(CREDENTIAL_PROVIDER_ID))
            .order(accounts::created_at.asc())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Account::from))
            .map_err(map_diesel_error)
    }
}
