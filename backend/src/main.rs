//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API with health probes and OpenAPI docs.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leadboard::inbound::http::health::HealthState;
use leadboard::outbound::persistence::{DbPool, run_pending_migrations_async};
use server::{AppSettings, DatabaseProbe, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;

    if settings.run_migrations {
        let applied = run_pending_migrations_async(database_url.to_owned())
            .await
            .map_err(io::Error::other)?;
        info!(applied, "database migrations complete");
    }

    let pool_config = settings.pool_config().map_err(io::Error::other)?;
    let db_pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let cookies = settings.cookie_config().map_err(io::Error::other)?;

    let health_state = web::Data::new(
        HealthState::new().with_probe(Arc::new(DatabaseProbe::new(db_pool.clone()))),
    );

    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr, cookies, db_pool);
    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, cookies, db_pool, make_metrics()?);

    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("leadboard")
        .endpoint("/metrics")
        .build()
        .map_err(|err| io::Error::other(err.to_string()))
}
