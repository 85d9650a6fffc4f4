//! Repository for the `cameras` table.

use mandlacx_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::camera::{Camera, CreateCamera};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, location";

/// Provides access to cameras.
pub struct CameraRepo;

impl CameraRepo {
    /// List every camera ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Camera>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cameras ORDER BY id");
        sqlx::query_as::<_, Camera>(&query).fetch_all(pool).await
    }

    /// IDs of every camera, for random assignment of new incidents.
    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM cameras ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Insert a camera, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateCamera) -> Result<Camera, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO cameras (name, location) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Camera>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .fetch_one(executor)
            .await
    }

    /// Delete every camera (and, by cascade, their incidents).
    /// Returns the number of cameras removed.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM cameras").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
