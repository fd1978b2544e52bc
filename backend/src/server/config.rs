//! Server settings loaded via OrthoConfig, and the assembled server
//! configuration handed to [`super::create_server`].

use std::net::SocketAddr;

use chrono::Duration;
use leadboard::inbound::http::state::SessionCookieConfig;
use leadboard::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_SESSION_TTL_DAYS: u32 = 7;

/// Problems with the loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database URL is required (set LEADBOARD_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("session TTL must be at least one day")]
    InvalidSessionTtl,
}

/// Runtime settings from CLI flags, `LEADBOARD_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEADBOARD")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled connections; defaults to 10.
    pub pool_max_size: Option<u32>,
    /// Session lifetime in days; defaults to 7.
    pub session_ttl_days: Option<u32>,
    /// Set `Secure` on the session cookie.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Session lifetime shared by the store and the cookie `Max-Age`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidSessionTtl`] for a zero-day TTL.
    pub fn session_ttl(&self) -> Result<Duration, SettingsError> {
        match self.session_ttl_days.unwrap_or(DEFAULT_SESSION_TTL_DAYS) {
            0 => Err(SettingsError::InvalidSessionTtl),
            days => Ok(Duration::days(i64::from(days))),
        }
    }

    /// Cookie attributes derived from these settings.
    ///
    /// # Errors
    ///
    /// Propagates [`AppSettings::session_ttl`] failures.
    pub fn cookie_config(&self) -> Result<SessionCookieConfig, SettingsError> {
        Ok(SessionCookieConfig {
            secure: self.cookie_secure,
            ttl: self.session_ttl()?,
        })
    }

    /// Pool configuration for the configured database.
    ///
    /// # Errors
    ///
    /// Propagates [`AppSettings::database_url`] failures.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cookies: SessionCookieConfig,
    pub(crate) db_pool: DbPool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    /// Construct a server configuration around an established pool.
    #[cfg(not(feature = "metrics"))]
    #[must_use]
    pub fn new(bind_addr: SocketAddr, cookies: SessionCookieConfig, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            cookies,
            db_pool,
        }
    }

    /// Construct a server configuration with Prometheus middleware.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        cookies: SessionCookieConfig,
        db_pool: DbPool,
        prometheus: PrometheusMetrics,
    ) -> Self {
        Self {
            bind_addr,
            cookies,
            db_pool,
            prometheus,
        }
    }
}
