//! Campaign aggregate.
//!
//! Campaign counters (`total_leads`, `successful_leads`, `response_rate`)
//! are stored values. They are set when a campaign is created or seeded and
//! are never recomputed from the leads table.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stable campaign identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CampaignId(Uuid);

impl CampaignId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for CampaignId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form campaign status.
///
/// The well-known values are `draft`, `active`, `paused` and `completed`,
/// but any non-empty string is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CampaignStatus(String);

impl CampaignStatus {
    pub const DRAFT: &'static str = "draft";
    pub const ACTIVE: &'static str = "active";
    pub const PAUSED: &'static str = "paused";
    pub const COMPLETED: &'static str = "completed";

    /// Use `raw` when present and non-empty, otherwise `draft`.
    ///
    /// # Examples
    /// ```
    /// use leadboard::domain::CampaignStatus;
    ///
    /// assert_eq!(CampaignStatus::or_default(None).as_ref(), "draft");
    /// assert_eq!(CampaignStatus::or_default(Some("archived".into())).as_ref(), "archived");
    /// ```
    pub fn or_default(raw: Option<String>) -> Self {
        raw.filter(|value| !value.is_empty())
            .map_or_else(Self::default, Self)
    }

    /// Wrap a stored status value verbatim.
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }
}

impl Default for CampaignStatus {
    fn default() -> Self {
        Self(Self::DRAFT.to_owned())
    }
}

impl AsRef<str> for CampaignStatus {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted campaign record.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub total_leads: i32,
    pub successful_leads: i32,
    pub response_rate: f64,
    pub created_at: DateTime<Utc>,
}

/// Error returned when a campaign payload lacks a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Campaign name is required")]
pub struct MissingCampaignName;

/// Validated input for creating a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    name: String,
    status: CampaignStatus,
}

impl NewCampaign {
    /// Validate raw create-campaign fields.
    ///
    /// Names that are missing, empty or only whitespace are rejected.
    pub fn try_new(
        name: Option<String>,
        status: Option<String>,
    ) -> Result<Self, MissingCampaignName> {
        let name = name
            .filter(|value| !value.trim().is_empty())
            .ok_or(MissingCampaignName)?;
        Ok(Self {
            name,
            status: CampaignStatus::or_default(status),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn status(&self) -> &CampaignStatus {
        &self.status
    }

    /// Materialise the campaign with zeroed counters.
    pub fn into_campaign(self, created_at: DateTime<Utc>) -> Campaign {
        Campaign {
            id: CampaignId::random(),
            name: self.name,
            status: self.status,
            total_leads: 0,
            successful_leads: 0,
            response_rate: 0.0,
            created_at,
        }
    }
}
