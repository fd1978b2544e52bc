//! Driving port for creating campaigns.

use async_trait::async_trait;

use crate::domain::{Campaign, Error, NewCampaign};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignsCommand: Send + Sync {
    /// Create a campaign with zeroed counters and return the stored record.
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, Error>;
}
