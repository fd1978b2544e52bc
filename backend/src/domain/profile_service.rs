//! Profile settings service for the authenticated user.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{ProfileCommand, ProfileQuery, UserRepository};
use super::store_failure::user_failure;
use super::{Error, ProfileUpdate, User, UserId};

const FETCH_FAILED: &str = "Failed to fetch settings";
const UPDATE_FAILED: &str = "Failed to update settings";
const USER_NOT_FOUND: &str = "User not found";

/// Reads and updates the user's own profile fields.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl ProfileQuery for ProfileService {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|err| user_failure(FETCH_FAILED, err))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl ProfileCommand for ProfileService {
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<(), Error> {
        let updated = self
            .users
            .update_profile(user_id, &update, self.clock.utc())
            .await
            .map_err(|err| user_failure(UPDATE_FAILED, err))?;
        if !updated {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        info!(
            %user_id,
            name_changed = update.name().is_some(),
            image_changed = update.image().is_some(),
            "profile updated"
        );
        Ok(())
    }
}
