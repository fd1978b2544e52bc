//! Port abstraction for provider account persistence.
use async_trait::async_trait;

use crate::domain::{Account, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch the email/password account for a user, if one exists.
    async fn find_credential(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Account>, AccountPersistenceError>;
}
