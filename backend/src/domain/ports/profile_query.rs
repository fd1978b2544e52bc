//! Driving port for reading the authenticated user's profile.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Return the user row, or `not_found` when it no longer exists.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error>;
}
