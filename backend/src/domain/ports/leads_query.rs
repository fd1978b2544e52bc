//! Driving port for the filtered, paginated lead listing.

use async_trait::async_trait;

use crate::domain::{Error, LeadListQuery, LeadSummary};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadsQuery: Send + Sync {
    /// One page of leads matching `query`. No total count is reported.
    async fn list_leads(&self, query: &LeadListQuery) -> Result<Vec<LeadSummary>, Error>;
}
