//! The dashboard driven over real HTTP.
//!
//! Serves the full router on an ephemeral port and points
//! `HttpIncidentClient` at it, so URL paths, the `?count=` query and the
//! camelCase/flattened wire shapes are checked against the live server.

mod common;

use assert_matches::assert_matches;
use common::{seed_camera, seed_incidents, spawn_server};
use mandlacx_dashboard::client::{HttpIncidentClient, IncidentApi};
use mandlacx_dashboard::config::DashboardConfig;
use mandlacx_dashboard::error::ClientError;
use mandlacx_dashboard::player::PlayerScene;
use mandlacx_dashboard::view::Dashboard;
use mandlacx_db::repositories::IncidentRepo;
use sqlx::PgPool;

async fn seed_three_cameras(pool: &PgPool) -> [i64; 3] {
    [
        seed_camera(pool, "Camera 01", "Shop Floor A").await,
        seed_camera(pool, "Camera 02", "Vault").await,
        seed_camera(pool, "Camera 03", "Entrance").await,
    ]
}

/// Config as the dashboard binary would read it, with the API URL set and
/// a trailing slash that must be trimmed.
fn config_for(base: &str) -> DashboardConfig {
    let url = format!("{base}/");
    DashboardConfig::from_lookup(move |key| (key == "DASHBOARD_API_URL").then(|| url.clone()))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_reads_cameras_and_feed(pool: PgPool) {
    let cams = seed_three_cameras(&pool).await;
    seed_incidents(&pool, cams[1], 3).await;
    let client = HttpIncidentClient::new(spawn_server(pool).await);

    let cameras = client.list_cameras().await.unwrap();
    assert_eq!(cameras.len(), 3);
    assert_eq!(cameras[1].location, "Vault");

    let feed = client.list_incidents().await.unwrap();
    assert_eq!(feed.len(), 3);
    assert!(feed.iter().all(|item| item.camera.id == cams[1]));
    assert!(feed.iter().all(|item| !item.incident.resolved));
    assert!(feed[0].incident.ts_start >= feed[1].incident.ts_start);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_generates_requested_count(pool: PgPool) {
    seed_three_cameras(&pool).await;
    let client = HttpIncidentClient::new(spawn_server(pool.clone()).await);

    let batch = client.generate_incidents(Some(2)).await.unwrap();
    assert!(batch.success);
    assert_eq!(batch.count, 2);

    let batch = client.generate_incidents(None).await.unwrap();
    assert_eq!(batch.count, 5);
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_surfaces_api_errors(pool: PgPool) {
    let client = HttpIncidentClient::new(spawn_server(pool).await);

    let err = client.resolve_incident(999_999).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 404, ref body } if body.contains("NOT_FOUND")
    );

    let err = client.generate_incidents(Some(51)).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 400, ref body } if body.contains("VALIDATION_ERROR")
    );
}

// ---------------------------------------------------------------------------
// Dashboard over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_resolves_nine_of_twelve_and_refills(pool: PgPool) {
    let cams = seed_three_cameras(&pool).await;
    for cam in cams {
        seed_incidents(&pool, cam, 4).await;
    }
    let config = config_for(&spawn_server(pool.clone()).await);
    let mut dash = Dashboard::new(HttpIncidentClient::new(config.api_url.clone()), &config);

    dash.load().await;
    assert_eq!(dash.state().cameras().len(), 3);
    assert_eq!(dash.state().incidents().len(), 12);
    let newest = dash.state().incidents()[0].id();
    assert_eq!(dash.state().selected_incident_id(), Some(newest));
    assert_matches!(dash.player_view(), PlayerScene::Incident(scene) if scene.incident.id() == newest);

    let ids: Vec<i64> = dash.state().incidents()[..9].iter().map(|i| i.id()).collect();
    for id in &ids[..8] {
        dash.resolve(*id).await;
    }
    // The eighth resolve hit the low-water mark: 4 left plus 5 generated.
    assert!(!dash.state().is_refilling());
    assert_eq!(dash.state().incidents().len(), 9);

    dash.resolve(ids[8]).await;
    dash.flush().await;

    assert_eq!(dash.state().incidents().len(), 8);
    assert_eq!(dash.list_view().heading, "8 Unresolved Incidents");
    assert!(dash.state().incidents().iter().all(|item| !ids.contains(&item.id())));
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 8);
}
