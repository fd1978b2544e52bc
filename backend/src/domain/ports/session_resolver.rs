//! Driving port mapping a session token onto an authenticated identity.
//!
//! Inbound adapters extract the token from the request and call this port
//! once; everything downstream works with the typed [`Identity`].

use async_trait::async_trait;

use crate::domain::{Error, Identity, SessionToken};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve `token` to an identity.
    ///
    /// Unknown and expired tokens yield `Ok(None)`; only store failures are
    /// errors.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Identity>, Error>;
}
