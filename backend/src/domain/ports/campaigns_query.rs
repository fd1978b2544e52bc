//! Driving port for campaign listings.

use async_trait::async_trait;

use crate::domain::{Campaign, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignsQuery: Send + Sync {
    /// Every campaign in stable `created_at, id` order.
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, Error>;
}
