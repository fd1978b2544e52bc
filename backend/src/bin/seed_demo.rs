//! Replace campaigns and leads with the demonstration data set.
//!
//! Reads `LEADBOARD_DATABASE_URL` (or `--database-url`), applies pending
//! migrations unless disabled, then seeds and reports the row counts.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use leadboard::domain::DemoDataSeeder;
use leadboard::outbound::persistence::{
    DbPool, DieselDemoDataRepository, PoolConfig, run_pending_migrations_async,
};

/// Settings for the seeding run, sharing the server's `LEADBOARD_` prefix.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEADBOARD")]
struct SeedSettings {
    /// PostgreSQL connection string.
    database_url: Option<String>,
    /// Apply pending migrations before seeding.
    #[ortho_config(default = true)]
    run_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|err| eyre!("tracing init failed: {err}"))?;

    let settings = SeedSettings::load().map_err(|err| eyre!("load settings: {err}"))?;
    let database_url = settings
        .database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("database URL is required (set LEADBOARD_DATABASE_URL)"))?;

    if settings.run_migrations {
        run_pending_migrations_async(database_url.clone())
            .await
            .wrap_err("apply migrations")?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .wrap_err("connect to database")?;
    let seeder = DemoDataSeeder::new(
        Arc::new(DieselDemoDataRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let counts = seeder.seed().await.wrap_err("seed demo data")?;

    info!(
        campaigns = counts.campaigns,
        leads = counts.leads,
        "demo data seeded"
    );
    Ok(())
}
