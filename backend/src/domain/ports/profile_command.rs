//! Driving port for updating the authenticated user's profile.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply `update`; fails with `not_found` when the user row is gone.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<(), Error>;
}
