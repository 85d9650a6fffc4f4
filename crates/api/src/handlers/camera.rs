//! Handlers for the `/cameras` resource.

use axum::extract::State;
use axum::Json;
use mandlacx_db::models::camera::Camera;
use mandlacx_db::repositories::CameraRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/cameras
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Camera>>> {
    let cameras = CameraRepo::list(&state.pool).await?;
    Ok(Json(cameras))
}
