//! PostgreSQL-backed demo data replacement.
//!
//! Deletes every lead and campaign and inserts the supplied records inside a
//! single transaction, so a failed seed leaves the previous data intact.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{DemoDataCounts, DemoDataPersistenceError, DemoDataRepository};
use crate::domain::{Campaign, Lead};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewCampaignRow, NewLeadRow};
use super::pool::{DbPool, PoolError};
use super::schema::{campaigns, leads};

/// Diesel-backed implementation of the [`DemoDataRepository`] port.
#[derive(Clone)]
pub struct DieselDemoDataRepository {
    pool: DbPool,
}

impl DieselDemoDataRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DemoDataPersistenceError {
    DemoDataPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DemoDataPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => DemoDataPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            DemoDataPersistenceError::query("demo data constraint violated")
        }
        DieselFailure::Query(message) => DemoDataPersistenceError::query(message),
    }
}

#[async_trait]
impl DemoDataRepository for DieselDemoDataRepository {
    async fn replace_all(
        &self,
        campaign_records: &[Campaign],
        lead_records: &[Lead],
    ) -> Result<DemoDataCounts, DemoDataPersistenceError> {
        let campaign_rows: Vec<NewCampaignRow<'_>> =
            campaign_records.iter().map(NewCampaignRow::from).collect();
        let lead_rows: Vec<NewLeadRow<'_>> = lead_records.iter().map(NewLeadRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(leads::table).execute(conn).await?;
                diesel::delete(campaigns::table).execute(conn).await?;

                let campaigns_written = if campaign_rows.is_empty() {
                    0
                } else {
                    diesel::insert_into(campaigns::table)
                        .values(&campaign_rows)
                        .execute(conn)
                        .await?
                };
                let leads_written = if lead_rows.is_empty() {
                    0
                } else {
                    diesel::insert_into(leads::table)
                        .values(&lead_rows)
                        .execute(conn)
                        .await?
                };

                Ok(DemoDataCounts {
                    campaigns: campaigns_written,
                    leads: leads_written,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
