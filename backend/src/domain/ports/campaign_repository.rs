//! Port abstraction for campaign persistence.
use async_trait::async_trait;

use crate::domain::Campaign;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by campaign repository adapters.
    pub enum CampaignPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "campaign repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "campaign repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Return every campaign ordered by `created_at`, then `id`.
    async fn list_all(&self) -> Result<Vec<Campaign>, CampaignPersistenceError>;

    /// Persist a campaign record and return the stored row.
    async fn insert(&self, campaign: &Campaign) -> Result<Campaign, CampaignPersistenceError>;
}
