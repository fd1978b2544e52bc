//! PostgreSQL-backed `LeadRepository` implementation using Diesel ORM.
//!
//! Listings left-join `campaigns` so each lead carries its campaign name and
//! apply the optional name search and status predicates before paginating.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LeadPersistenceError, LeadRepository};
use crate::domain::{Lead, LeadListQuery, LeadStatusFilter, LeadSummary};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{LeadRow, LeadSummaryRow, NewLeadRow};
use super::pool::{DbPool, PoolError};
use super::schema::{campaigns, leads};

/// Diesel-backed implementation of the [`LeadRepository`] port.
#[derive(Clone)]
pub struct DieselLeadRepository {
    pool: DbPool,
}

impl DieselLeadRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LeadPersistenceError {
    LeadPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, lead: Option<&Lead>) -> LeadPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => LeadPersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation { .. } => {
            match lead.and_then(|lead| lead.campaign_id) {
                Some(campaign_id) => LeadPersistenceError::unknown_campaign(campaign_id.to_string()),
                None => LeadPersistenceError::query("lead constraint violated"),
            }
        }
        DieselFailure::UniqueViolation { .. } => {
            LeadPersistenceError::query("lead constraint violated")
        }
        DieselFailure::Query(message) => LeadPersistenceError::query(message),
    }
}

#[async_trait]
impl LeadRepository for DieselLeadRepository {
    async fn list(&self, query: &LeadListQuery) -> Result<Vec<LeadSummary>, LeadPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = leads::table
            .left_join(campaigns::table)
            .select((
                leads::id,
                leads::name,
                leads::email,
                leads::company,
                leads::status,
                leads::last_contact_date,
                leads::created_at,
                campaigns::name.nullable(),
            ))
            .into_boxed();

        if let Some(pattern) = query.search_pattern() {
            statement = statement.filter(
                leads::name
                    .like(pattern)
                    .escape(LeadListQuery::like_escape()),
            );
        }
        if let LeadStatusFilter::Only(status) = query.status() {
            statement = statement.filter(leads::status.eq(status.as_ref().to_owned()));
        }

        statement
            .order((leads::created_at.asc(), leads::id.asc()))
            .limit(i64::from(query.limit()))
            .offset(query.offset())
            .load::<LeadSummaryRow>(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(LeadSummary::from).collect())
            .map_err(|err| map_diesel_error(err, None))
    }

    async fn insert(&self, lead: &Lead) -> Result<Lead, LeadPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(leads::table)
            .values(NewLeadRow::from(lead))
            .returning(LeadRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Lead::from)
            .map_err(|err| map_diesel_error(err, Some(lead)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CampaignId, NewLead, NewLeadDraft};
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn lead_with_campaign(campaign_id: Option<CampaignId>) -> Lead {
        NewLead::try_new(NewLeadDraft {
            name: Some("Jane Smith".into()),
            email: Some("jane@startup.io".into()),
            campaign_id,
            ..NewLeadDraft::default()
        })
        .expect("valid lead")
        .into_lead(Utc::now())
    }

    fn foreign_key_error() -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("insert or update on table \"leads\" violates foreign key".to_string()),
        )
    }

    #[rstest]
    fn foreign_key_violation_names_the_campaign() {
        let campaign_id = CampaignId::random();
        let lead = lead_with_campaign(Some(campaign_id));

        let err = map_diesel_error(foreign_key_error(), Some(&lead));

        assert_eq!(
            err,
            LeadPersistenceError::unknown_campaign(campaign_id.to_string())
        );
    }

    #[rstest]
    fn foreign_key_violation_without_campaign_is_query_error() {
        let lead = lead_with_campaign(None);
        let err = map_diesel_error(foreign_key_error(), Some(&lead));
        assert!(matches!(err, LeadPersistenceError::Query { .. }));
    }
}
