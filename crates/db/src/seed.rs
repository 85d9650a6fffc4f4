//! Demo dataset reseeding.
//!
//! Wipes all incidents and cameras, then recreates three cameras and a
//! day's worth of unresolved incidents. Runs in one transaction so a failure
//! leaves the previous dataset intact.

use chrono::Utc;
use mandlacx_core::error::CoreError;
use mandlacx_core::generation::{draft_incidents, SEED_WINDOW};
use rand::Rng;

use crate::models::camera::CreateCamera;
use crate::repositories::{CameraRepo, IncidentRepo};
use crate::DbPool;

/// Number of incidents created by a reseed.
pub const SEED_INCIDENT_COUNT: usize = 12;

/// Name and location of each demo camera.
pub const SEED_CAMERAS: [(&str, &str); 3] = [
    ("Camera 01", "Shop Floor A"),
    ("Camera 02", "Vault"),
    ("Camera 03", "Entrance"),
];

/// Row counts touched by a reseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub incidents_deleted: u64,
    pub cameras_deleted: u64,
    pub cameras_created: usize,
    pub incidents_created: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Replace the current dataset with the demo dataset.
pub async fn reseed<R: Rng + ?Sized>(pool: &DbPool, rng: &mut R) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;

    let incidents_deleted = IncidentRepo::delete_all(&mut *tx).await?;
    let cameras_deleted = CameraRepo::delete_all(&mut *tx).await?;
    tracing::info!(incidents_deleted, cameras_deleted, "Old data deleted");

    let mut camera_ids = Vec::with_capacity(SEED_CAMERAS.len());
    for (name, location) in SEED_CAMERAS {
        let input = CreateCamera {
            name: name.to_string(),
            location: location.to_string(),
        };
        let camera = CameraRepo::create(&mut *tx, &input).await?;
        camera_ids.push(camera.id);
    }
    tracing::info!(count = camera_ids.len(), "Created cameras");

    let drafts = draft_incidents(rng, &camera_ids, SEED_INCIDENT_COUNT, Utc::now(), SEED_WINDOW)?;
    let created = IncidentRepo::insert_batch(&mut *tx, &drafts).await?;
    tracing::info!(count = created.len(), "Created unresolved incidents");

    tx.commit().await?;

    Ok(SeedSummary {
        incidents_deleted,
        cameras_deleted,
        cameras_created: camera_ids.len(),
        incidents_created: created.len(),
    })
}
