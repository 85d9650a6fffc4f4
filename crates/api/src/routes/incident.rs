//! Route definitions for the `/incidents` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::incident;
use crate::state::AppState;

/// Routes mounted at `/incidents`.
///
/// ```text
/// GET   /               -> list_unresolved
/// POST  /add            -> generate
/// PATCH /{id}/resolve   -> resolve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(incident::list_unresolved))
        .route("/add", post(incident::generate))
        .route("/{id}/resolve", patch(incident::resolve))
}
