//! Session-cookie authentication service.
//!
//! Implements [`SessionResolver`] and [`AuthCommand`] over the user, account
//! and session repositories. Time comes from an injected [`Clock`] so session
//! expiry is testable.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::{debug, info};

use super::ports::{
    AccountRepository, AuthCommand, AuthOutcome, PasswordHasher, SessionRepository,
    SessionResolver, UserPersistenceError, UserRepository,
};
use super::store_failure::{account_failure, hash_failure, session_failure, user_failure};
use super::{
    Account, ClientMetadata, Error, Identity, Session, SessionToken, SignInCredentials,
    SignUpDetails, User,
};

const SIGN_UP_FAILED: &str = "Failed to sign up";
const SIGN_IN_FAILED: &str = "Failed to sign in";
const SIGN_OUT_FAILED: &str = "Failed to sign out";
const RESOLVE_FAILED: &str = "Failed to resolve session";
const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Repositories and collaborators required by [`AuthService`].
#[derive(Clone)]
pub struct AuthServicePorts {
    pub users: Arc<dyn UserRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// Email/password authentication backed by persisted sessions.
#[derive(Clone)]
pub struct AuthService {
    ports: AuthServicePorts,
    clock: Arc<dyn Clock>,
    session_ttl: Duration,
}

impl AuthService {
    /// Create the service. New sessions expire `session_ttl` after creation.
    pub fn new(ports: AuthServicePorts, clock: Arc<dyn Clock>, session_ttl: Duration) -> Self {
        Self {
            ports,
            clock,
            session_ttl,
        }
    }

    fn start_session(&self, user: &User, client: ClientMetadata) -> Session {
        let now = self.clock.utc();
        Session::open(user.id, client, now, now + self.session_ttl)
    }

    async fn open_session(
        &self,
        user: User,
        client: ClientMetadata,
        operation: &'static str,
    ) -> Result<AuthOutcome, Error> {
        let session = self.start_session(&user, client);
        self.ports
            .sessions
            .insert(&session)
            .await
            .map_err(|err| session_failure(operation, err))?;
        info!(user_id = %user.id, session_id = %session.id, "session opened");
        Ok(AuthOutcome { user, session })
    }
}

#[async_trait]
impl SessionResolver for AuthService {
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Identity>, Error> {
        let session = self
            .ports
            .sessions
            .find_by_token(token)
            .await
            .map_err(|err| session_failure(RESOLVE_FAILED, err))?;

        let Some(session) = session else {
            debug!(token = %token.redacted(), "session token not found");
            return Ok(None);
        };
        if session.is_expired_at(self.clock.utc()) {
            debug!(
                token = %token.redacted(),
                expires_at = %session.expires_at,
                "session expired"
            );
            return Ok(None);
        }
        debug!(token = %token.redacted(), user_id = %session.user_id, "session resolved");
        Ok(Some(session.identity()))
    }
}

#[async_trait]
impl AuthCommand for AuthService {
    async fn sign_up(
        &self,
        details: SignUpDetails,
        client: ClientMetadata,
    ) -> Result<AuthOutcome, Error> {
        let existing = self
            .ports
            .users
            .find_by_email(details.email())
            .await
            .map_err(|err| user_failure(SIGN_UP_FAILED, err))?;
        if existing.is_some() {
            return Err(Error::conflict(USER_EXISTS));
        }

        let password_hash = self
            .ports
            .hasher
            .hash(details.password())
            .await
            .map_err(|err| hash_failure(SIGN_UP_FAILED, err))?;

        let now = self.clock.utc();
        let user = User::register(details.name().to_owned(), details.email(), now);
        let account = Account::credential(user.id, password_hash, now);
        let session = self.start_session(&user, client);
        self.ports
            .users
            .register(&user, &account, &session)
            .await
            .map_err(|err| match err {
                UserPersistenceError::DuplicateEmail { .. } => Error::conflict(USER_EXISTS),
                other => user_failure(SIGN_UP_FAILED, other),
            })?;
        info!(user_id = %user.id, session_id = %session.id, "user registered");

        Ok(AuthOutcome { user, session })
    }

    async fn sign_in(
        &self,
        credentials: SignInCredentials,
        client: ClientMetadata,
    ) -> Result<AuthOutcome, Error> {
        let user = self
            .ports
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| user_failure(SIGN_IN_FAILED, err))?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let stored_hash = self
            .ports
            .accounts
            .find_credential(&user.id)
            .await
            .map_err(|err| account_failure(SIGN_IN_FAILED, err))?
            .and_then(|account| account.password_hash)
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let verified = self
            .ports
            .hasher
            .verify(credentials.password(), &stored_hash)
            .await
            .map_err(|err| hash_failure(SIGN_IN_FAILED, err))?;
        if !verified {
            debug!(user_id = %user.id, "password verification failed");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.open_session(user, client, SIGN_IN_FAILED).await
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), Error> {
        let removed = self
            .ports
            .sessions
            .delete_by_token(token)
            .await
            .map_err(|err| session_failure(SIGN_OUT_FAILED, err))?;
        debug!(token = %token.redacted(), removed, "session closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
