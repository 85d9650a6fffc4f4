//! Repository for the `incidents` table.

use mandlacx_core::generation::IncidentDraft;
use mandlacx_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::incident::{Incident, IncidentCameraRow, IncidentWithCamera};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, incident_type, ts_start, ts_end, thumbnail_url, resolved, camera_id";

/// Provides access to incidents.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Find an incident by its internal ID, resolved or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents WHERE id = $1");
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List unresolved incidents joined with their camera, newest start first.
    ///
    /// Ties on `ts_start` fall back to the higher ID first so the order is stable.
    pub async fn list_unresolved_with_camera(
        pool: &PgPool,
    ) -> Result<Vec<IncidentWithCamera>, sqlx::Error> {
        let rows = sqlx::query_as::<_, IncidentCameraRow>(
            "SELECT i.id, i.incident_type, i.ts_start, i.ts_end, i.thumbnail_url, \
                    i.resolved, i.camera_id, \
                    c.name AS camera_name, c.location AS camera_location \
             FROM incidents i \
             JOIN cameras c ON c.id = i.camera_id \
             WHERE i.resolved = FALSE \
             ORDER BY i.ts_start DESC, i.id DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(IncidentWithCamera::from).collect())
    }

    /// Count incidents still awaiting review.
    pub async fn count_unresolved(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM incidents WHERE resolved = FALSE")
            .fetch_one(pool)
            .await
    }

    /// Mark an incident resolved, returning the updated row.
    ///
    /// Resolving an already-resolved incident succeeds and returns it unchanged.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn resolve(pool: &PgPool, id: DbId) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET resolved = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a batch of drafted incidents in a single statement, so either
    /// every draft lands or none does. New rows are always unresolved.
    pub async fn insert_batch<'e, E>(
        executor: E,
        drafts: &[IncidentDraft],
    ) -> Result<Vec<Incident>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let camera_ids: Vec<DbId> = drafts.iter().map(|d| d.camera_id).collect();
        let types: Vec<String> = drafts
            .iter()
            .map(|d| d.incident_type.label().to_string())
            .collect();
        let starts: Vec<Timestamp> = drafts.iter().map(|d| d.ts_start).collect();
        let ends: Vec<Timestamp> = drafts.iter().map(|d| d.ts_end).collect();
        let thumbnails: Vec<String> = drafts.iter().map(|d| d.thumbnail_url.clone()).collect();

        let query = format!(
            "INSERT INTO incidents (camera_id, incident_type, ts_start, ts_end, thumbnail_url) \
             SELECT * FROM UNNEST($1::bigint[], $2::text[], $3::timestamptz[], $4::timestamptz[], $5::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(&camera_ids)
            .bind(&types)
            .bind(&starts)
            .bind(&ends)
            .bind(&thumbnails)
            .fetch_all(executor)
            .await
    }

    /// Delete every incident. Only used when reseeding.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM incidents").execute(executor).await?;
        Ok(result.rows_affected())
    }
}
