//! Driving port for creating leads.

use async_trait::async_trait;

use crate::domain::{Error, Lead, NewLead};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadsCommand: Send + Sync {
    /// Create a lead and return the stored record. Campaign counters are
    /// left untouched.
    async fn create_lead(&self, lead: NewLead) -> Result<Lead, Error>;
}
