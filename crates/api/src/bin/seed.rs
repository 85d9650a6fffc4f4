//! Reset the database to the demo dataset.
//!
//! Deletes every incident and camera, then creates three cameras and a day of
//! unresolved incidents. Intended for local development and demo resets.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mandlacx_db=info,mandlacx_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = mandlacx_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    mandlacx_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Start seeding");
    let summary = mandlacx_db::seed::reseed(&pool, &mut rand::rng())
        .await
        .context("Seeding failed")?;
    tracing::info!(
        cameras = summary.cameras_created,
        incidents = summary.incidents_created,
        "Seeding finished"
    );

    pool.close().await;
    Ok(())
}
