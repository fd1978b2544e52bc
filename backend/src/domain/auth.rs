//! Authentication primitives: session tokens, sessions, credential accounts
//! and validated sign-up/sign-in payloads.
//!
//! Inbound adapters hand raw strings to the constructors here so that
//! services only ever see validated values.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::{EmailAddress, UserId, UserValidationError};

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum password length accepted at sign-up.
pub const MAX_PASSWORD_LENGTH: usize = 128;
/// Provider identifier for email/password accounts.
pub const CREDENTIAL_PROVIDER_ID: &str = "credential";

const TOKEN_BYTES: usize = 32;
const REDACTED_PREFIX_LEN: usize = 6;

/// Opaque session token carried in the session cookie.
///
/// `Debug` and [`SessionToken::redacted`] only expose a short prefix so
/// tokens never reach logs in full.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token (256 bits, hex encoded).
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        rand::thread_rng().fill_bytes(bytes.as_mut_slice());
        Self(hex::encode(bytes.as_slice()))
    }

    /// Wrap a token read from a cookie. Empty values yield `None`.
    ///
    /// # Examples
    /// ```
    /// use leadboard::domain::SessionToken;
    ///
    /// assert!(SessionToken::from_cookie_value("").is_none());
    /// assert_eq!(
    ///     SessionToken::from_cookie_value("abc").map(|t| t.as_str().to_owned()),
    ///     Some("abc".to_owned())
    /// );
    /// ```
    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Raw token value for persistence lookups and cookies.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Short prefix suitable for log fields.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(REDACTED_PREFIX_LEN).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&self.redacted()).finish()
    }
}

/// Request metadata recorded alongside new sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Persisted login session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub token: SessionToken,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for `user_id` expiring at `expires_at`.
    pub fn open(
        user_id: UserId,
        client: ClientMetadata,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: SessionToken::generate(),
            user_id,
            expires_at,
            ip_address: client.ip_address,
            user_agent: client.user_agent,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the session is no longer valid at `now`.
    ///
    /// A session expiring exactly at `now` counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Normalised identity handed to authenticated handlers.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            session_id: self.id,
            expires_at: self.expires_at,
        }
    }
}

/// Authenticated caller resolved from a session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Provider account linked to a user.
///
/// Email/password sign-up creates a `credential` account whose
/// `account_id` equals the user id and whose `password` holds the hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub account_id: String,
    pub provider_id: String,
    pub user_id: UserId,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build the credential account for a freshly registered user.
    pub fn credential(user_id: UserId, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: user_id.to_string(),
            provider_id: CREDENTIAL_PROVIDER_ID.to_owned(),
            user_id,
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validation failures for sign-up and sign-in payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("Password must be at most {max} characters long")]
    PasswordTooLong { max: usize },
}

impl CredentialValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingEmail | Self::InvalidEmail => "email",
            Self::MissingPassword | Self::PasswordTooShort { .. } | Self::PasswordTooLong { .. } => {
                "password"
            }
        }
    }
}

fn parse_email(raw: Option<&str>) -> Result<EmailAddress, CredentialValidationError> {
    EmailAddress::parse(raw.unwrap_or_default()).map_err(|err| match err {
        UserValidationError::EmptyEmail => CredentialValidationError::MissingEmail,
        _ => CredentialValidationError::InvalidEmail,
    })
}

fn require_password(raw: Option<&str>) -> Result<Zeroizing<String>, CredentialValidationError> {
    match raw {
        Some(password) if !password.is_empty() => Ok(Zeroizing::new(password.to_owned())),
        _ => Err(CredentialValidationError::MissingPassword),
    }
}

/// Validated email/password sign-up payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    name: String,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignUpDetails {
    /// Validate raw sign-up fields.
    ///
    /// # Examples
    /// ```
    /// use leadboard::domain::{CredentialValidationError, SignUpDetails};
    ///
    /// let err = SignUpDetails::try_from_parts(Some("Ada"), Some("ada@example.com"), Some("short"))
    ///     .unwrap_err();
    /// assert_eq!(err, CredentialValidationError::PasswordTooShort { min: 8 });
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialValidationError> {
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(CredentialValidationError::MissingName)?;
        let email = parse_email(email)?;
        let password = require_password(password)?;
        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(CredentialValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(CredentialValidationError::PasswordTooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated email/password sign-in payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Validate raw sign-in fields. Password length is not checked here.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            email: parse_email(email)?,
            password: require_password(password)?,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
