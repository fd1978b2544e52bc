//! Demo data seeding.
//!
//! Builds the fixed demonstration campaigns and leads and hands them to a
//! [`DemoDataRepository`], which replaces whatever campaign and lead rows
//! exist.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{DemoDataCounts, DemoDataPersistenceError, DemoDataRepository};
use crate::domain::{Campaign, CampaignId, CampaignStatus, Lead, LeadId, LeadStatus};

/// Errors raised while applying demo data.
#[derive(Debug, Error)]
pub enum DemoDataSeedingError {
    /// Persistence adapter failed while replacing rows.
    #[error("demo data persistence error: {0}")]
    Persistence(#[from] DemoDataPersistenceError),
}

struct CampaignSeed {
    name: &'static str,
    status: &'static str,
    total_leads: i32,
    successful_leads: i32,
    response_rate: f64,
}

struct LeadSeed {
    name: &'static str,
    email: &'static str,
    company: &'static str,
    campaign: usize,
    status: &'static str,
    contacted_days_ago: i64,
}

const CAMPAIGNS: [CampaignSeed; 3] = [
    CampaignSeed {
        name: "Q1 Email Campaign",
        status: CampaignStatus::ACTIVE,
        total_leads: 150,
        successful_leads: 45,
        response_rate: 30.0,
    },
    CampaignSeed {
        name: "Product Launch",
        status: CampaignStatus::PAUSED,
        total_leads: 200,
        successful_leads: 80,
        response_rate: 40.0,
    },
    CampaignSeed {
        name: "Summer Sale Campaign",
        status: CampaignStatus::COMPLETED,
        total_leads: 300,
        successful_leads: 120,
        response_rate: 40.0,
    },
];

const LEADS: [LeadSeed; 5] = [
    LeadSeed {
        name: "John Doe",
        email: "john@techcorp.com",
        company: "Tech Corp",
        campaign: 0,
        status: LeadStatus::PENDING,
        contacted_days_ago: 0,
    },
    LeadSeed {
        name: "Jane Smith",
        email: "jane@startup.io",
        company: "Startup Inc",
        campaign: 0,
        status: LeadStatus::CONTACTED,
        contacted_days_ago: 1,
    },
    LeadSeed {
        name: "Bob Wilson",
        email: "bob@enterprise.com",
        company: "Enterprise Ltd",
        campaign: 1,
        status: LeadStatus::RESPONDED,
        contacted_days_ago: 2,
    },
    LeadSeed {
        name: "Alice Johnson",
        email: "alice@company.net",
        company: "Company Net",
        campaign: 1,
        status: LeadStatus::CONVERTED,
        contacted_days_ago: 3,
    },
    LeadSeed {
        name: "Mike Brown",
        email: "mike@business.co",
        company: "Business Co",
        campaign: 2,
        status: LeadStatus::PENDING,
        contacted_days_ago: 0,
    },
];

/// Service that replaces campaign and lead data with the demo set.
#[derive(Clone)]
pub struct DemoDataSeeder {
    repository: Arc<dyn DemoDataRepository>,
    clock: Arc<dyn Clock>,
}

impl DemoDataSeeder {
    pub fn new(repository: Arc<dyn DemoDataRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Clear campaigns and leads, then insert the demo records.
    ///
    /// Leads are created one millisecond apart in seed order so listings
    /// return them in a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`DemoDataSeedingError`] when the repository write fails.
    pub async fn seed(&self) -> Result<DemoDataCounts, DemoDataSeedingError> {
        let now = self.clock.utc();
        let campaigns = demo_campaigns(now);
        let leads = demo_leads(&campaigns, now);
        let counts = self.repository.replace_all(&campaigns, &leads).await?;
        info!(
            campaigns = counts.campaigns,
            leads = counts.leads,
            "demo data seeded"
        );
        Ok(counts)
    }
}

fn demo_campaigns(now: DateTime<Utc>) -> Vec<Campaign> {
    CAMPAIGNS
        .iter()
        .map(|seed| Campaign {
            id: CampaignId::random(),
            name: seed.name.to_owned(),
            status: CampaignStatus::from_stored(seed.status.to_owned()),
            total_leads: seed.total_leads,
            successful_leads: seed.successful_leads,
            response_rate: seed.response_rate,
            created_at: now,
        })
        .collect()
}

fn demo_leads(campaigns: &[Campaign], now: DateTime<Utc>) -> Vec<Lead> {
    LEADS
        .iter()
        .zip(0_i64..)
        .map(|(seed, position)| Lead {
            id: LeadId::random(),
            name: seed.name.to_owned(),
            email: seed.email.to_owned(),
            company: Some(seed.company.to_owned()),
            campaign_id: campaigns.get(seed.campaign).map(|campaign| campaign.id),
            status: LeadStatus::from_stored(seed.status.to_owned()),
            last_contact_date: Some(now - Duration::days(seed.contacted_days_ago)),
            created_at: now + Duration::milliseconds(position),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDemoDataRepository;
    use crate::domain::test_clock::{fixture_clock, fixture_now};

    #[test]
    fn leads_reference_seeded_campaigns() {
        let campaigns = demo_campaigns(fixture_now());
        let leads = demo_leads(&campaigns, fixture_now());

        assert_eq!(leads.len(), 5);
        assert_eq!(leads[0].campaign_id, Some(campaigns[0].id));
        assert_eq!(leads[2].campaign_id, Some(campaigns[1].id));
        assert_eq!(leads[4].campaign_id, Some(campaigns[2].id));
        assert_eq!(
            leads[3].last_contact_date,
            Some(fixture_now() - Duration::days(3))
        );
    }

    #[test]
    fn lead_creation_times_follow_seed_order() {
        let campaigns = demo_campaigns(fixture_now());
        let leads = demo_leads(&campaigns, fixture_now());

        assert!(leads.windows(2).all(|pair| pair[0].created_at < pair[1].created_at));
    }

    #[tokio::test]
    async fn seed_replaces_all_rows() {
        let mut repo = MockDemoDataRepository::new();
        repo.expect_replace_all()
            .withf(|campaigns, leads| {
                campaigns.len() == 3
                    && campaigns[0].name == "Q1 Email Campaign"
                    && campaigns[2].status.as_ref() == "completed"
                    && leads.len() == 5
            })
            .times(1)
            .return_once(|campaigns, leads| {
                Ok(DemoDataCounts {
                    campaigns: campaigns.len(),
                    leads: leads.len(),
                })
            });

        let counts = DemoDataSeeder::new(Arc::new(repo), fixture_clock())
            .seed()
            .await
            .expect("seeding succeeds");
        assert_eq!(
            counts,
            DemoDataCounts {
                campaigns: 3,
                leads: 5
            }
        );
    }

    #[tokio::test]
    async fn seed_propagates_persistence_failure() {
        let mut repo = MockDemoDataRepository::new();
        repo.expect_replace_all()
            .return_once(|_, _| Err(DemoDataPersistenceError::connection("refused")));

        let err = DemoDataSeeder::new(Arc::new(repo), fixture_clock())
            .seed()
            .await
            .expect_err("seeding fails");
        assert!(matches!(err, DemoDataSeedingError::Persistence(_)));
    }
}
