//! Campaign listing and creation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{CampaignRepository, CampaignsCommand, CampaignsQuery};
use super::store_failure::campaign_failure;
use super::{Campaign, Error, NewCampaign};

const FETCH_FAILED: &str = "Failed to fetch campaigns";
const CREATE_FAILED: &str = "Failed to create campaign";

/// Campaign use-cases over a [`CampaignRepository`].
#[derive(Clone)]
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    clock: Arc<dyn Clock>,
}

impl CampaignService {
    pub fn new(campaigns: Arc<dyn CampaignRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { campaigns, clock }
    }
}

#[async_trait]
impl CampaignsQuery for CampaignService {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        self.campaigns
            .list_all()
            .await
            .map_err(|err| campaign_failure(FETCH_FAILED, err))
    }
}

#[async_trait]
impl CampaignsCommand for CampaignService {
    async fn create_campaign(&self, campaign: NewCampaign) -> Result<Campaign, Error> {
        let campaign = self
            .campaigns
            .insert(&campaign.into_campaign(self.clock.utc()))
            .await
            .map_err(|err| campaign_failure(CREATE_FAILED, err))?;
        info!(campaign_id = %campaign.id, status = campaign.status.as_ref(), "campaign created");
        Ok(campaign)
    }
}
