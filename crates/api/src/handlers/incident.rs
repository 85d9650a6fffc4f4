//! Handlers for the `/incidents` resource.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use mandlacx_core::error::CoreError;
use mandlacx_core::generation::{
    draft_incidents, DEFAULT_GENERATION_COUNT, LIVE_WINDOW, MAX_GENERATION_COUNT,
};
use mandlacx_core::types::DbId;
use mandlacx_db::models::incident::{GeneratedBatch, Incident, IncidentWithCamera};
use mandlacx_db::repositories::{CameraRepo, IncidentRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::query::GenerateParams;
use crate::state::AppState;

/// GET /api/incidents
///
/// Unresolved incidents with their camera, newest first.
pub async fn list_unresolved(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<IncidentWithCamera>>> {
    let incidents = IncidentRepo::list_unresolved_with_camera(&state.pool).await?;
    Ok(Json(incidents))
}

/// PATCH /api/incidents/{id}/resolve
///
/// Idempotent: resolving an already-resolved incident returns it unchanged.
pub async fn resolve(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Incident>> {
    let incident = IncidentRepo::resolve(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Incident",
            id,
        }))?;
    tracing::info!(incident_id = id, "Incident resolved");
    Ok(Json(incident))
}

/// POST /api/incidents/add
///
/// Draft `count` (default 5) fresh incidents against random cameras and
/// insert them as one batch. Fails without inserting if there are no cameras.
pub async fn generate(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GenerateParams>,
) -> AppResult<Json<GeneratedBatch>> {
    let count = params.count.unwrap_or(DEFAULT_GENERATION_COUNT);
    if count == 0 || count > MAX_GENERATION_COUNT {
        return Err(AppError::Core(CoreError::Validation(format!(
            "count must be between 1 and {MAX_GENERATION_COUNT}, got {count}"
        ))));
    }

    let camera_ids = CameraRepo::list_ids(&state.pool).await?;
    let drafts = draft_incidents(&mut rand::rng(), &camera_ids, count, Utc::now(), LIVE_WINDOW)?;

    let inserted = IncidentRepo::insert_batch(&state.pool, &drafts).await?;
    let count = inserted.len() as u64;
    tracing::info!(count, "Generated synthetic incidents");

    Ok(Json(GeneratedBatch {
        success: true,
        count,
    }))
}
