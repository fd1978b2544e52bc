//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{Session, SessionToken};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewSessionRow, SessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel-backed implementation of the [`SessionRepository`] port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionPersistenceError {
    SessionPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> SessionPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => SessionPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } => {
            SessionPersistenceError::query("session token collision")
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            SessionPersistenceError::query("session references unknown user")
        }
        DieselFailure::Query(message) => SessionPersistenceError::query(message),
    }
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(sessions::table)
            .values(NewSessionRow::from(session))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sessions::table
            .filter(sessions::token.eq(token.as_str()))
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.and_then(|row| {
            let session_id = row.id;
            let session = row.into_session();
            if session.is_none() {
                warn!(%session_id, "stored session has an empty token");
            }
            session
        }))
    }

    async fn delete_by_token(&self, token: &SessionToken) -> Result<bool, SessionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.filter(sessions::token.eq(token.as_str())))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
