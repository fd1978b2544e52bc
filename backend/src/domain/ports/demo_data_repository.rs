//! Port for replacing campaign and lead data with a demo data set.
use async_trait::async_trait;

use crate::domain::{Campaign, Lead};

use super::define_port_error;

define_port_error! {
    /// Errors raised while writing demo data.
    pub enum DemoDataPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "demo data connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "demo data write failed: {message}",
    }
}

/// Row counts written by a demo data replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoDataCounts {
    pub campaigns: usize,
    pub leads: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoDataRepository: Send + Sync {
    /// Delete all leads and campaigns, then insert the supplied records.
    async fn replace_all(
        &self,
        campaigns: &[Campaign],
        leads: &[Lead],
    ) -> Result<DemoDataCounts, DemoDataPersistenceError>;
}
