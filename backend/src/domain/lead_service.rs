//! Lead listing and creation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use super::ports::{LeadPersistenceError, LeadRepository, LeadsCommand, LeadsQuery};
use super::store_failure::lead_failure;
use super::{Error, Lead, LeadListQuery, LeadSummary, NewLead};

const FETCH_FAILED: &str = "Failed to fetch leads";
const CREATE_FAILED: &str = "Failed to create lead";

/// Lead use-cases over a [`LeadRepository`].
#[derive(Clone)]
pub struct LeadService {
    leads: Arc<dyn LeadRepository>,
    clock: Arc<dyn Clock>,
}

impl LeadService {
    pub fn new(leads: Arc<dyn LeadRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { leads, clock }
    }
}

#[async_trait]
impl LeadsQuery for LeadService {
    async fn list_leads(&self, query: &LeadListQuery) -> Result<Vec<LeadSummary>, Error> {
        let leads = self
            .leads
            .list(query)
            .await
            .map_err(|err| lead_failure(FETCH_FAILED, err))?;
        debug!(
            page = query.page(),
            limit = query.limit(),
            returned = leads.len(),
            "leads listed"
        );
        Ok(leads)
    }
}

#[async_trait]
impl LeadsCommand for LeadService {
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, Error> {
        let draft = lead.into_lead(self.clock.utc());
        let lead = self.leads.insert(&draft).await.map_err(|err| match err {
            LeadPersistenceError::UnknownCampaign { campaign_id } => {
                Error::invalid_request("campaignId does not reference an existing campaign")
                    .with_details(json!({
                        "field": "campaignId",
                        "value": campaign_id,
                        "code": "unknown_campaign",
                    }))
            }
            other => lead_failure(CREATE_FAILED, other),
        })?;
        info!(lead_id = %lead.id, status = lead.status.as_ref(), "lead created");
        Ok(lead)
    }
}
