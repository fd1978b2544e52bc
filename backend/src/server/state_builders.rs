//! Builders wiring Diesel repositories and domain services into HTTP state.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use leadboard::domain::{
    AuthService, AuthServicePorts, CampaignService, LeadService, ProfileService,
};
use leadboard::inbound::http::health::ReadinessProbe;
use leadboard::inbound::http::state::{HttpState, HttpStatePorts};
use leadboard::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselCampaignRepository, DieselLeadRepository,
    DieselSessionRepository, DieselUserRepository,
};
use leadboard::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

/// Readiness probe round-tripping `SELECT 1` through the pool.
pub(crate) struct DatabaseProbe {
    pool: DbPool,
}

impl DatabaseProbe {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadinessProbe for DatabaseProbe {
    async fn check(&self) -> Result<(), String> {
        self.pool.ping().await.map_err(|err| err.to_string())
    }
}

/// Build the HTTP state over database-backed services.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = &config.db_pool;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(DieselUserRepository::new(pool.clone()));

    let auth = Arc::new(AuthService::new(
        AuthServicePorts {
            users: users.clone(),
            accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
            sessions: Arc::new(DieselSessionRepository::new(pool.clone())),
            hasher: Arc::new(BcryptPasswordHasher::default()),
        },
        clock.clone(),
        config.cookies.ttl,
    ));
    let profile = Arc::new(ProfileService::new(users, clock.clone()));
    let campaigns = Arc::new(CampaignService::new(
        Arc::new(DieselCampaignRepository::new(pool.clone())),
        clock.clone(),
    ));
    let leads = Arc::new(LeadService::new(
        Arc::new(DieselLeadRepository::new(pool.clone())),
        clock,
    ));

    HttpState::new(
        HttpStatePorts {
            sessions: auth.clone(),
            auth,
            profile: profile.clone(),
            profile_command: profile,
            campaigns: campaigns.clone(),
            campaigns_command: campaigns,
            leads: leads.clone(),
            leads_command: leads,
        },
        config.cookies,
    )
}
