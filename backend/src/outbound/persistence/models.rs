//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records live next
//! to the rows they read.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Account, Campaign, CampaignId, CampaignStatus, Lead, LeadId, LeadStatus, LeadSummary, Session,
    SessionToken, User, UserId,
};

use super::schema::{accounts, campaigns, leads, sessions, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the `user` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from(row.id),
            name: row.name,
            email: row.email,
            email_verified: row.email_verified,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub email_verified: bool,
    pub image: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name.as_deref(),
            email: user.email.as_str(),
            email_verified: user.email_verified,
            image: user.image.as_deref(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Changeset for profile updates. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub name: Option<&'a str>,
    pub image: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Row struct for reading from the `session` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRow {
    /// Convert into a domain session. Rows with an empty token yield `None`.
    pub fn into_session(self) -> Option<Session> {
        let token = SessionToken::from_cookie_value(&self.token)?;
        Some(Session {
            id: self.id,
            token,
            user_id: UserId::from(self.user_id),
            expires_at: self.expires_at,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable struct for opening sessions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub id: Uuid,
    pub token: &'a str,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Session> for NewSessionRow<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            id: session.id,
            token: session.token.as_str(),
            user_id: *session.user_id.as_uuid(),
            expires_at: session.expires_at,
            ip_address: session.ip_address.as_deref(),
            user_agent: session.user_agent.as_deref(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Subset of the `account` table read for credential checks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub account_id: String,
    pub provider_id: String,
    pub user_id: Uuid,
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            provider_id: row.provider_id,
            user_id: UserId::from(row.user_id),
            password_hash: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for provider accounts. OAuth token columns stay NULL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub account_id: &'a str,
    pub provider_id: &'a str,
    pub user_id: Uuid,
    pub password: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Account> for NewAccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: account.id,
            account_id: account.account_id.as_str(),
            provider_id: account.provider_id.as_str(),
            user_id: *account.user_id.as_uuid(),
            password: account.password_hash.as_deref(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

/// Row struct for reading from the `campaigns` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = campaigns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CampaignRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub total_leads: i32,
    pub successful_leads: i32,
    pub response_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Self {
            id: CampaignId::from(row.id),
            name: row.name,
            status: CampaignStatus::from_stored(row.status),
            total_leads: row.total_leads,
            successful_leads: row.successful_leads,
            response_rate: row.response_rate,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for campaigns.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = campaigns)]
pub(crate) struct NewCampaignRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub status: &'a str,
    pub total_leads: i32,
    pub successful_leads: i32,
    pub response_rate: f64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Campaign> for NewCampaignRow<'a> {
    fn from(campaign: &'a Campaign) -> Self {
        Self {
            id: *campaign.id.as_uuid(),
            name: campaign.name.as_str(),
            status: campaign.status.as_ref(),
            total_leads: campaign.total_leads,
            successful_leads: campaign.successful_leads,
            response_rate: campaign.response_rate,
            created_at: campaign.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

/// Row struct for reading from the `leads` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = leads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LeadRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub campaign_id: Option<Uuid>,
    pub status: String,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Self {
            id: LeadId::from(row.id),
            name: row.name,
            email: row.email,
            company: row.company,
            campaign_id: row.campaign_id.map(CampaignId::from),
            status: LeadStatus::from_stored(row.status),
            last_contact_date: row.last_contact_date,
            created_at: row.created_at,
        }
    }
}

/// Lead columns joined with the owning campaign's name.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct LeadSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub status: String,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub campaign_name: Option<String>,
}

impl From<LeadSummaryRow> for LeadSummary {
    fn from(row: LeadSummaryRow) -> Self {
        Self {
            id: LeadId::from(row.id),
            name: row.name,
            email: row.email,
            company: row.company,
            status: LeadStatus::from_stored(row.status),
            last_contact_date: row.last_contact_date,
            campaign_name: row.campaign_name,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for leads.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = leads)]
pub(crate) struct NewLeadRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub company: Option<&'a str>,
    pub campaign_id: Option<Uuid>,
    pub status: &'a str,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Lead> for NewLeadRow<'a> {
    fn from(lead: &'a Lead) -> Self {
        Self {
            id: *lead.id.as_uuid(),
            name: lead.name.as_str(),
            email: lead.email.as_str(),
            company: lead.company.as_deref(),
            campaign_id: lead.campaign_id.map(|id| *id.as_uuid()),
            status: lead.status.as_ref(),
            last_contact_date: lead.last_contact_date,
            created_at: lead.created_at,
        }
    }
}
