//! Port abstraction for lead persistence and the filtered lead listing.
use async_trait::async_trait;

use crate::domain::{Lead, LeadListQuery, LeadSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by lead repository adapters.
    pub enum LeadPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "lead repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "lead repository query failed: {message}",
        /// The referenced campaign does not exist.
        UnknownCampaign { campaign_id: String } => "campaign {campaign_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Run the filtered, paginated listing joined with campaign names.
    async fn list(&self, query: &LeadListQuery) -> Result<Vec<LeadSummary>, LeadPersistenceError>;

    /// Persist a lead record and return the stored row.
    async fn insert(&self, lead: &Lead) -> Result<Lead, LeadPersistenceError>;
}
