//! Lead records and the filtered, paginated lead list query.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::CampaignId;

/// Default page number for lead listings.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size for lead listings.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

const STATUS_ALL: &str = "all";
const LIKE_ESCAPE: char = '\\';

/// Stable lead identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeadId(Uuid);

impl LeadId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for LeadId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form lead status.
///
/// The well-known values are `pending`, `contacted`, `responded` and
/// `converted`; any non-empty string is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeadStatus(String);

impl LeadStatus {
    pub const PENDING: &'static str = "pending";
    pub const CONTACTED: &'static str = "contacted";
    pub const RESPONDED: &'static str = "responded";
    pub const CONVERTED: &'static str = "converted";

    /// Use `raw` when present and non-empty, otherwise `pending`.
    pub fn or_default(raw: Option<String>) -> Self {
        raw.filter(|value| !value.is_empty())
            .map_or_else(Self::default, Self)
    }

    /// Wrap a stored status value verbatim.
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self(Self::PENDING.to_owned())
    }
}

impl AsRef<str> for LeadStatus {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted lead record.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub campaign_id: Option<CampaignId>,
    pub status: LeadStatus,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Lead row as listed, with the owning campaign's name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadSummary {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub campaign_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Error returned when a lead payload lacks a name or email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Name and email are required")]
pub struct MissingLeadContact;

/// Validated input for creating a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    name: String,
    email: String,
    company: Option<String>,
    campaign_id: Option<CampaignId>,
    status: LeadStatus,
    last_contact_date: Option<DateTime<Utc>>,
}

/// Raw create-lead fields after transport-level parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLeadDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub campaign_id: Option<CampaignId>,
    pub status: Option<String>,
    pub last_contact_date: Option<DateTime<Utc>>,
}

impl NewLead {
    /// Validate a draft. `name` and `email` must both be non-blank.
    ///
    /// # Examples
    /// ```
    /// use leadboard::domain::{NewLead, NewLeadDraft};
    ///
    /// let lead = NewLead::try_new(NewLeadDraft {
    ///     name: Some("John Doe".into()),
    ///     email: Some("john@techcorp.com".into()),
    ///     ..NewLeadDraft::default()
    /// })
    /// .unwrap();
    /// assert_eq!(lead.status().as_ref(), "pending");
    /// ```
    pub fn try_new(draft: NewLeadDraft) -> Result<Self, MissingLeadContact> {
        let NewLeadDraft {
            name,
            email,
            company,
            campaign_id,
            status,
            last_contact_date,
        } = draft;
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let (Some(name), Some(email)) = (present(name), present(email)) else {
            return Err(MissingLeadContact);
        };
        Ok(Self {
            name,
            email,
            company: company.filter(|value| !value.is_empty()),
            campaign_id,
            status: LeadStatus::or_default(status),
            last_contact_date,
        })
    }

    pub fn status(&self) -> &LeadStatus {
        &self.status
    }

    pub fn campaign_id(&self) -> Option<CampaignId> {
        self.campaign_id
    }

    /// Materialise the lead record.
    pub fn into_lead(self, created_at: DateTime<Utc>) -> Lead {
        Lead {
            id: LeadId::random(),
            name: self.name,
            email: self.email,
            company: self.company,
            campaign_id: self.campaign_id,
            status: self.status,
            last_contact_date: self.last_contact_date,
            created_at,
        }
    }
}

/// Status predicate for lead listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeadStatusFilter {
    /// No status predicate.
    #[default]
    All,
    /// Exact equality on the stored status.
    Only(LeadStatus),
}

impl LeadStatusFilter {
    /// Interpret a raw `status` parameter. Missing, empty or `all` means no
    /// filter.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(STATUS_ALL) => Self::All,
            Some(status) => Self::Only(LeadStatus(status.to_owned())),
        }
    }
}

/// Validation failures for lead list parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LeadListQueryError {
    #[error("page must be at least 1")]
    PageOutOfRange,
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange { max: u32 },
}

/// Filtered, paginated lead listing request.
///
/// Pagination is offset based: `offset = (page - 1) * limit`. Results are
/// ordered by `created_at` then `id` so page boundaries are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadListQuery {
    page: u32,
    limit: u32,
    search: Option<String>,
    status: LeadStatusFilter,
}

impl Default for LeadListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            status: LeadStatusFilter::All,
        }
    }
}

impl LeadListQuery {
    /// Validate list parameters. An empty `search` is treated as absent.
    pub fn try_new(
        page: u32,
        limit: u32,
        search: Option<String>,
        status: LeadStatusFilter,
    ) -> Result<Self, LeadListQueryError> {
        if page == 0 {
            return Err(LeadListQueryError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(LeadListQueryError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(Self {
            page,
            limit,
            search: search.filter(|value| !value.is_empty()),
            status,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn status(&self) -> &LeadStatusFilter {
        &self.status
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// `LIKE` pattern for the name search, with wildcards in the search text
    /// escaped by [`LeadListQuery::like_escape`].
    ///
    /// # Examples
    /// ```
    /// use leadboard::domain::{LeadListQuery, LeadStatusFilter};
    ///
    /// let query = LeadListQuery::try_new(1, 20, Some("50%_off".into()), LeadStatusFilter::All)
    ///     .unwrap();
    /// assert_eq!(query.search_pattern().as_deref(), Some(r"%50\%\_off%"));
    /// ```
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|search| {
            let mut pattern = String::with_capacity(search.len() + 2);
            pattern.push('%');
            for ch in search.chars() {
                if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
                    pattern.push(LIKE_ESCAPE);
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }

    /// Escape character used by [`LeadListQuery::search_pattern`].
    pub const fn like_escape() -> char {
        LIKE_ESCAPE
    }
}
