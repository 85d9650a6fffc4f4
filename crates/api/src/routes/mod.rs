pub mod camera;
pub mod health;
pub mod incident;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cameras                      list
///
/// /incidents                    list unresolved (newest first)
/// /incidents/add                generate synthetic incidents (POST)
/// /incidents/{id}/resolve       mark resolved (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cameras", camera::router())
        .nest("/incidents", incident::router())
}
