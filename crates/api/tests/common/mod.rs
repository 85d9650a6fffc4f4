#![allow(dead_code)]

use std::future::IntoFuture;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeDelta, Utc};
use http_body_util::BodyExt;
use mandlacx_core::generation::IncidentDraft;
use mandlacx_core::incident_type::IncidentType;
use mandlacx_core::types::DbId;
use mandlacx_db::models::camera::CreateCamera;
use mandlacx_db::repositories::{CameraRepo, IncidentRepo};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceExt;

use mandlacx_api::config::ServerConfig;
use mandlacx_api::router::build_app_router;
use mandlacx_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Serve the full application on an ephemeral local port and return the
/// `/api` base URL. The server runs until the test's runtime shuts down.
pub async fn spawn_server(pool: PgPool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(axum::serve(listener, build_test_app(pool)).into_future());
    format!("http://{addr}/api")
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_camera(pool: &PgPool, name: &str, location: &str) -> DbId {
    let input = CreateCamera {
        name: name.to_string(),
        location: location.to_string(),
    };
    CameraRepo::create(pool, &input).await.unwrap().id
}

/// Insert `count` unresolved incidents on `camera_id`, one minute apart,
/// the newest starting `count` minutes ago.
pub async fn seed_incidents(pool: &PgPool, camera_id: DbId, count: usize) -> Vec<DbId> {
    let now = Utc::now();
    let drafts: Vec<IncidentDraft> = (0..count)
        .map(|i| {
            let start = now - TimeDelta::minutes((count + i) as i64);
            IncidentDraft {
                camera_id,
                incident_type: IncidentType::ALL[i % IncidentType::ALL.len()],
                ts_start: start,
                ts_end: start + TimeDelta::seconds(20),
                thumbnail_url: format!("https://picsum.photos/seed/{i}.5/300/200"),
            }
        })
        .collect();
    IncidentRepo::insert_batch(pool, &drafts)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect()
}
