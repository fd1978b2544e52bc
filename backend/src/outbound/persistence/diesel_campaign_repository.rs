//! PostgreSQL-backed `CampaignRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Campaign;
use crate::domain::ports::{CampaignPersistenceError, CampaignRepository};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CampaignRow, NewCampaignRow};
use super::pool::{DbPool, PoolError};
use super::schema::campaigns;

/// Diesel-backed implementation of the [`CampaignRepository`] port.
#[derive(Clone)]
pub struct DieselCampaignRepository {
    pool: DbPool,
}

impl DieselCampaignRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CampaignPersistenceError {
    CampaignPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CampaignPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CampaignPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            CampaignPersistenceError::query("campaign constraint violated")
        }
        DieselFailure::Query(message) => CampaignPersistenceError::query(message),
    }
}

#[async_trait]
impl CampaignRepository for DieselCampaignRepository {
    async fn list_all(&self) -> Result<Vec<Campaign>, CampaignPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        campaigns::table
            .order((campaigns::created_at.asc(), campaigns::id.asc()))
            .select(CampaignRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Campaign::from).collect())
            .map_err(map_diesel_error)
    }

    async fn insert(&self, campaign: &Campaign) -> Result<Campaign, CampaignPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(campaigns::table)
            .values(NewCampaignRow::from(campaign))
            .returning(CampaignRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Campaign::from)
            .map_err(map_diesel_error)
    }
}
