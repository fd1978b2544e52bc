//! Port abstraction for login session persistence.
use async_trait::async_trait;

use crate::domain::{Session, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by session repository adapters.
    pub enum SessionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly opened session.
    async fn insert(&self, session: &Session) -> Result<(), SessionPersistenceError>;

    /// Look a session up by exact token match. Expiry is not checked here.
    async fn find_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, SessionPersistenceError>;

    /// Delete the session holding `token`, returning whether a row existed.
    async fn delete_by_token(&self, token: &SessionToken) -> Result<bool, SessionPersistenceError>;
}
