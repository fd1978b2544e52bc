//! User identity and profile data.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised by user-facing constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be a valid address")]
    InvalidEmail,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalised email address used for account lookups.
///
/// ## Invariants
/// - Trimmed and lower-cased.
/// - Exactly one `@` with a non-empty local part and domain.
///
/// # Examples
/// ```
/// use leadboard::domain::EmailAddress;
///
/// let email = EmailAddress::parse("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise a raw email address.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let mut parts = trimmed.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None)
                if !local.is_empty() && !domain.is_empty() && !domain.contains(char::is_whitespace)
        );
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered, unverified user.
    pub fn register(name: String, email: &EmailAddress, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::random(),
            name: Some(name),
            email: email.as_ref().to_owned(),
            email_verified: false,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Error returned when a profile update carries nothing to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Name or image is required")]
pub struct EmptyProfileUpdate;

/// Partial profile update; at least one field is always present.
///
/// Empty strings count as absent, so `{"name": ""}` is rejected rather than
/// blanking the stored name.
///
/// # Examples
/// ```
/// use leadboard::domain::ProfileUpdate;
///
/// let update = ProfileUpdate::try_new(Some("Ada".into()), Some(String::new())).unwrap();
/// assert_eq!(update.name(), Some("Ada"));
/// assert_eq!(update.image(), None);
/// assert!(ProfileUpdate::try_new(None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: Option<String>,
    image: Option<String>,
}

impl ProfileUpdate {
    /// Construct an update, rejecting payloads with no usable field.
    pub fn try_new(
        name: Option<String>,
        image: Option<String>,
    ) -> Result<Self, EmptyProfileUpdate> {
        let name = name.filter(|value| !value.is_empty());
        let image = image.filter(|value| !value.is_empty());
        if name.is_none() && image.is_none() {
            return Err(EmptyProfileUpdate);
        }
        Ok(Self { name, image })
    }

    /// New display name, when supplied.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// New avatar reference, when supplied.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
