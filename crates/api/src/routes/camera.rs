//! Route definitions for the `/cameras` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::camera;
use crate::state::AppState;

/// Routes mounted at `/cameras`.
///
/// ```text
/// GET /   -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(camera::list))
}
