//! HTTP-level integration tests for the `/api/cameras` and `/api/incidents`
//! endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Cameras and incidents are created via the repository layer, then
//! exercised and verified through the HTTP API.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch, post, seed_camera, seed_incidents};
use mandlacx_db::repositories::IncidentRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// GET /api/cameras
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_cameras_returns_all(pool: PgPool) {
    seed_camera(&pool, "Camera 01", "Shop Floor A").await;
    seed_camera(&pool, "Camera 02", "Vault").await;

    let response = get(build_test_app(pool), "/api/cameras").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let cameras = json.as_array().unwrap();
    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[0]["name"], "Camera 01");
    assert_eq!(cameras[1]["location"], "Vault");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_cameras_empty(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/cameras").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// GET /api/incidents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_incidents_is_unresolved_and_newest_first(pool: PgPool) {
    let cam = seed_camera(&pool, "Camera 03", "Entrance").await;
    let ids = seed_incidents(&pool, cam, 4).await;
    IncidentRepo::resolve(&pool, ids[1]).await.unwrap();

    let response = get(build_test_app(pool), "/api/incidents").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i["resolved"] == false));
    assert!(items.iter().all(|i| i["id"].as_i64() != Some(ids[1])));

    let starts: Vec<&str> = items.iter().map(|i| i["tsStart"].as_str().unwrap()).collect();
    let parsed: Vec<chrono::DateTime<chrono::Utc>> =
        starts.iter().map(|s| s.parse().unwrap()).collect();
    assert!(parsed.windows(2).all(|w| w[0] >= w[1]), "feed must be newest first");

    assert_eq!(items[0]["camera"]["name"], "Camera 03");
    assert_eq!(items[0]["cameraId"].as_i64(), Some(cam));
    assert!(items[0]["type"].is_string());
    assert!(items[0]["thumbnailUrl"].is_string());
}

// ---------------------------------------------------------------------------
// PATCH /api/incidents/{id}/resolve
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_marks_incident_resolved(pool: PgPool) {
    let cam = seed_camera(&pool, "Camera 01", "Shop Floor A").await;
    let ids = seed_incidents(&pool, cam, 2).await;

    let response = patch(
        build_test_app(pool.clone()),
        &format!("/api/incidents/{}/resolve", ids[0]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"].as_i64(), Some(ids[0]));
    assert_eq!(json["resolved"], true);

    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_twice_is_idempotent(pool: PgPool) {
    let cam = seed_camera(&pool, "Camera 01", "Shop Floor A").await;
    let ids = seed_incidents(&pool, cam, 1).await;
    let uri = format!("/api/incidents/{}/resolve", ids[0]);

    let first = patch(build_test_app(pool.clone()), &uri).await;
    let second = patch(build_test_app(pool), &uri).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["resolved"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_missing_returns_404_with_message(pool: PgPool) {
    let response = patch(build_test_app(pool), "/api/incidents/424242/resolve").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Incident with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_with_non_numeric_id_is_rejected(pool: PgPool) {
    let response = patch(build_test_app(pool), "/api/incidents/abc/resolve").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("abc"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_requires_patch(pool: PgPool) {
    let response = post(build_test_app(pool), "/api/incidents/1/resolve").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ---------------------------------------------------------------------------
// POST /api/incidents/add
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_adds_five_by_default(pool: PgPool) {
    let cam = seed_camera(&pool, "Camera 01", "Shop Floor A").await;
    seed_camera(&pool, "Camera 02", "Vault").await;
    seed_incidents(&pool, cam, 2).await;

    let response = post(build_test_app(pool.clone()), "/api/incidents/add").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 5);
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 7);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_respects_count_parameter(pool: PgPool) {
    seed_camera(&pool, "Camera 01", "Shop Floor A").await;

    let response = post(build_test_app(pool.clone()), "/api/incidents/add?count=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 3);
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_rejects_out_of_range_count(pool: PgPool) {
    seed_camera(&pool, "Camera 01", "Shop Floor A").await;

    for uri in ["/api/incidents/add?count=0", "/api/incidents/add?count=51"] {
        let response = post(build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_with_non_numeric_count_is_rejected(pool: PgPool) {
    seed_camera(&pool, "Camera 01", "Shop Floor A").await;

    for uri in ["/api/incidents/add?count=abc", "/api/incidents/add?count=-1"] {
        let response = post(build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST", "{uri}");
        assert!(json["message"].is_string());
    }
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_without_cameras_fails_and_inserts_nothing(pool: PgPool) {
    let response = post(build_test_app(pool.clone()), "/api/incidents/add").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(json["message"].is_string());
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generated_incidents_are_recent_and_well_ordered(pool: PgPool) {
    seed_camera(&pool, "Camera 02", "Vault").await;
    post(build_test_app(pool.clone()), "/api/incidents/add").await;

    let json = body_json(get(build_test_app(pool), "/api/incidents").await).await;
    let now = chrono::Utc::now();
    for item in json.as_array().unwrap() {
        let start: chrono::DateTime<chrono::Utc> = item["tsStart"].as_str().unwrap().parse().unwrap();
        let end: chrono::DateTime<chrono::Utc> = item["tsEnd"].as_str().unwrap().parse().unwrap();
        assert!(end >= start);
        assert!(now - start <= chrono::TimeDelta::seconds(61));
    }
}

// ---------------------------------------------------------------------------
// Scenario: resolve most of the feed, then top it up
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn resolve_nine_of_twelve_then_refill(pool: PgPool) {
    let cams = [
        seed_camera(&pool, "Camera 01", "Shop Floor A").await,
        seed_camera(&pool, "Camera 02", "Vault").await,
        seed_camera(&pool, "Camera 03", "Entrance").await,
    ];
    let mut ids = Vec::new();
    for cam in cams {
        ids.extend(seed_incidents(&pool, cam, 4).await);
    }
    assert_eq!(ids.len(), 12);

    for id in &ids[..9] {
        let response = patch(
            build_test_app(pool.clone()),
            &format!("/api/incidents/{id}/resolve"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(IncidentRepo::count_unresolved(&pool).await.unwrap(), 3);

    let response = post(build_test_app(pool.clone()), "/api/incidents/add").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(pool), "/api/incidents").await).await;
    assert_eq!(json.as_array().unwrap().len(), 8);
}
