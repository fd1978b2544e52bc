//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::ports::{
    AuthCommand, CampaignsCommand, CampaignsQuery, LeadsCommand, LeadsQuery, ProfileCommand,
    ProfileQuery, SessionResolver,
};

/// Attributes applied to the session cookie when it is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookieConfig {
    /// Set the `Secure` attribute. Disable only for plain-HTTP development.
    pub secure: bool,
    /// Cookie `Max-Age`; matches the server-side session lifetime.
    pub ttl: Duration,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            ttl: Duration::days(7),
        }
    }
}

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub sessions: Arc<dyn SessionResolver>,
    pub auth: Arc<dyn AuthCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub campaigns: Arc<dyn CampaignsQuery>,
    pub campaigns_command: Arc<dyn CampaignsCommand>,
    pub leads: Arc<dyn LeadsQuery>,
    pub leads_command: Arc<dyn LeadsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<dyn SessionResolver>,
    pub auth: Arc<dyn AuthCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub campaigns: Arc<dyn CampaignsQuery>,
    pub campaigns_command: Arc<dyn CampaignsCommand>,
    pub leads: Arc<dyn LeadsQuery>,
    pub leads_command: Arc<dyn LeadsCommand>,
    pub cookies: SessionCookieConfig,
}

impl HttpState {
    /// Construct state from a ports bundle and cookie settings.
    pub fn new(ports: HttpStatePorts, cookies: SessionCookieConfig) -> Self {
        let HttpStatePorts {
            sessions,
            auth,
            profile,
            profile_command,
            campaigns,
            campaigns_command,
            leads,
            leads_command,
        } = ports;
        Self {
            sessions,
            auth,
            profile,
            profile_command,
            campaigns,
            campaigns_command,
            leads,
            leads_command,
            cookies,
        }
    }
}
