//! Driving port for email/password sign-up, sign-in and sign-out.

use async_trait::async_trait;

use crate::domain::{
    ClientMetadata, Error, Session, SessionToken, SignInCredentials, SignUpDetails, User,
};

/// Successful authentication: the user and the session just opened.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub user: User,
    pub session: Session,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Register a user with a credential account and open a session.
    async fn sign_up(
        &self,
        details: SignUpDetails,
        client: ClientMetadata,
    ) -> Result<AuthOutcome, Error>;

    /// Verify credentials and open a session.
    async fn sign_in(
        &self,
        credentials: SignInCredentials,
        client: ClientMetadata,
    ) -> Result<AuthOutcome, Error>;

    /// Delete the session holding `token`. Unknown tokens are not an error.
    async fn sign_out(&self, token: &SessionToken) -> Result<(), Error>;
}
