//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (queries and commands) are implemented
//! by domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod auth_command;
mod campaign_repository;
mod campaigns_command;
mod campaigns_query;
mod demo_data_repository;
mod lead_repository;
mod leads_command;
mod leads_query;
mod password_hasher;
mod profile_command;
mod profile_query;
mod session_repository;
mod session_resolver;
mod user_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountPersistenceError, AccountRepository};
#[cfg(test)]
pub use auth_command::MockAuthCommand;
pub use auth_command::{AuthCommand, AuthOutcome};
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
pub use campaign_repository::{CampaignPersistenceError, CampaignRepository};
pub use campaigns_command::CampaignsCommand;
#[cfg(test)]
pub use campaigns_command::MockCampaignsCommand;
pub use campaigns_query::CampaignsQuery;
#[cfg(test)]
pub use campaigns_query::MockCampaignsQuery;
#[cfg(test)]
pub use demo_data_repository::MockDemoDataRepository;
pub use demo_data_repository::{DemoDataCounts, DemoDataPersistenceError, DemoDataRepository};
#[cfg(test)]
pub use lead_repository::MockLeadRepository;
pub use lead_repository::{LeadPersistenceError, LeadRepository};
pub use leads_command::LeadsCommand;
#[cfg(test)]
pub use leads_command::MockLeadsCommand;
pub use leads_query::LeadsQuery;
#[cfg(test)]
pub use leads_query::MockLeadsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionPersistenceError, SessionRepository};
#[cfg(test)]
pub use session_resolver::MockSessionResolver;
pub use session_resolver::SessionResolver;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
