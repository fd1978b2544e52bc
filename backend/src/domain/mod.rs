//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed entities used by the HTTP and persistence
//! layers, plus the services implementing the driving ports in [`ports`].
//! Types validate their invariants on construction; adapters never build
//! them from unchecked input.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, Session, Account: authentication records.
//! - Campaign, Lead, LeadListQuery: dashboard data and listing rules.
//! - AuthService, ProfileService, CampaignService, LeadService,
//!   DemoDataSeeder: use-case implementations.

pub mod error;
pub mod ports;

mod auth;
mod auth_service;
mod campaign;
mod campaign_service;
mod demo_data;
mod lead;
mod lead_service;
mod profile_service;
mod store_failure;
#[cfg(test)]
mod test_clock;
mod trace_id;
mod user;

pub use self::auth::{
    Account, CREDENTIAL_PROVIDER_ID, ClientMetadata, CredentialValidationError, Identity,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, Session, SessionToken, SignInCredentials,
    SignUpDetails,
};
pub use self::auth_service::{AuthService, AuthServicePorts};
pub use self::campaign::{Campaign, CampaignId, CampaignStatus, MissingCampaignName, NewCampaign};
pub use self::campaign_service::CampaignService;
pub use self::demo_data::{DemoDataSeeder, DemoDataSeedingError};
pub use self::error::{Error, ErrorCode};
pub use self::lead::{
    DEFAULT_LIMIT, DEFAULT_PAGE, Lead, LeadId, LeadListQuery, LeadListQueryError, LeadStatus,
    LeadStatusFilter, LeadSummary, MAX_LIMIT, MissingLeadContact, NewLead, NewLeadDraft,
};
pub use self::lead_service::LeadService;
pub use self::profile_service::ProfileService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, EmptyProfileUpdate, ProfileUpdate, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use leadboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("Unauthorized"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
