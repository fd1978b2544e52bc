//! Session cookie handling for HTTP handlers.
//!
//! The session token travels in the `auth_session` cookie; the legacy
//! `better_auth_session` name is still read so sessions issued before the
//! rename keep working. Handlers never parse cookies themselves: they take
//! [`SessionCookies`] when an optional token is enough, or [`Authenticated`]
//! to require a live session.

use std::net::SocketAddr;

use actix_web::cookie::time::{Duration as CookieDuration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::{ClientMetadata, Error, Identity, SessionToken};
use crate::inbound::http::state::{HttpState, SessionCookieConfig};

/// Current session cookie name.
pub const AUTH_SESSION_COOKIE: &str = "auth_session";
/// Session cookie name used before the rename; read-only.
pub const LEGACY_SESSION_COOKIE: &str = "better_auth_session";

const UNAUTHORIZED: &str = "Unauthorized";

/// Read the session token, preferring the current cookie name.
pub fn session_token(req: &HttpRequest) -> Option<SessionToken> {
    [AUTH_SESSION_COOKIE, LEGACY_SESSION_COOKIE]
        .into_iter()
        .find_map(|name| {
            req.cookie(name)
                .and_then(|cookie| SessionToken::from_cookie_value(cookie.value()))
        })
}

/// Client address and user agent recorded on new sessions.
pub fn client_metadata(req: &HttpRequest) -> ClientMetadata {
    let ip_address = req.connection_info().realip_remote_addr().map(|addr| {
        addr.parse::<SocketAddr>()
            .map_or_else(|_| addr.to_owned(), |socket| socket.ip().to_string())
    });
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    ClientMetadata {
        ip_address,
        user_agent,
    }
}

/// Build the cookie carrying a freshly issued session token.
pub fn session_cookie(token: &SessionToken, config: &SessionCookieConfig) -> Cookie<'static> {
    Cookie::build(AUTH_SESSION_COOKIE, token.as_str().to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(CookieDuration::seconds(config.ttl.num_seconds()))
        .finish()
}

/// Removal cookies for both the current and the legacy cookie names.
pub fn expired_session_cookies(config: &SessionCookieConfig) -> [Cookie<'static>; 2] {
    [AUTH_SESSION_COOKIE, LEGACY_SESSION_COOKIE].map(|name| {
        Cookie::build(name, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(config.secure)
            .max_age(CookieDuration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .finish()
    })
}

/// Session token presented by the caller, if any. Never fails.
#[derive(Debug, Clone)]
pub struct SessionCookies(pub Option<SessionToken>);

impl FromRequest for SessionCookies {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(session_token(req))))
    }
}

/// Identity of a caller holding a live session.
///
/// Extraction fails with `401 Unauthorized` when the cookie is missing, the
/// token is unknown, or the session has expired.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub Identity);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = session_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("Internal server error"))?;
            let token = token.ok_or_else(|| Error::unauthorized(UNAUTHORIZED))?;
            state
                .sessions
                .resolve(&token)
                .await?
                .map(Self)
                .ok_or_else(|| Error::unauthorized(UNAUTHORIZED))
        })
    }
}
