//! Admin catalog flows driven through the router.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use marquee::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "marquee-test-boundary";

async fn spawn_app() -> (Arc<marquee::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("marquee-admin-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.uploads.path = std::env::temp_dir()
        .join(format!("marquee-uploads-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();

    let state = marquee::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = marquee::api::router(state.clone()).await;
    (state, router)
}

/// Builds a multipart body from (name, value) text fields.
fn multipart_body(fields: &[(&str, &str)]) -> Body {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

fn multipart_request(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("X-Account-Id", "admin-1")
        .body(multipart_body(fields))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_movie(app: &Router, fields: &[(&str, &str)]) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(multipart_request("POST", "/api/catalog/admin/movies", fields))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn create_derives_slug_and_defaults() {
    let (_, app) = spawn_app().await;

    let body = create_movie(&app, &[("name", "The Dark Knight")]).await;

    assert_eq!(body["code"], "success");
    let movie = &body["data"];
    assert_eq!(movie["slug"], "the-dark-knight");
    assert_eq!(movie["status"], "active");
    assert_eq!(movie["position"], 1);
    assert_eq!(movie["prices"]["standard"], 50_000);
    assert_eq!(movie["prices"]["vip"], 60_000);
    assert_eq!(movie["prices"]["couple"], 110_000);
    assert_eq!(movie["createdBy"], "admin-1");
}

#[tokio::test]
async fn colliding_names_get_incrementing_suffixes() {
    let (_, app) = spawn_app().await;

    let first = create_movie(&app, &[("name", "Dune")]).await;
    let second = create_movie(&app, &[("name", "Dune")]).await;
    let third = create_movie(&app, &[("name", "Dune ")]).await;

    assert_eq!(first["data"]["slug"], "dune");
    assert_eq!(second["data"]["slug"], "dune-1");
    assert_eq!(third["data"]["slug"], "dune-2");
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/catalog/admin/movies",
            &[("name", "   "), ("status", "active")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "error");
}

#[tokio::test]
async fn list_paginates_with_consistent_counts() {
    let (_, app) = spawn_app().await;

    for i in 0..12 {
        let name = format!("Movie {i}");
        create_movie(&app, &[("name", name.as_str())]).await;
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/movies?limit=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let pagination = &body["data"]["pagination"];
    assert_eq!(pagination["totalRecords"], 12);
    assert_eq!(pagination["totalPages"], 2);
    assert_eq!(pagination["currentPage"], 1);
    assert_eq!(pagination["limit"], 10);
    assert_eq!(body["data"]["movies"].as_array().unwrap().len(), 10);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/movies?limit=10&page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;

    let returned = body["data"]["movies"].as_array().unwrap().len();
    let total = body["data"]["pagination"]["totalRecords"].as_u64().unwrap();
    assert_eq!(returned, 2);
    // skip + returned never exceeds the total count
    assert!(10 + returned as u64 <= total);
}

#[tokio::test]
async fn keyword_filter_matches_slugified_substring() {
    let (_, app) = spawn_app().await;

    create_movie(&app, &[("name", "Interstellar")]).await;
    create_movie(&app, &[("name", "Alien")]).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/movies?keyword=Inter")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;

    let movies = body["data"]["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["slug"], "interstellar");
}

#[tokio::test]
async fn update_keeps_slug_when_name_unchanged() {
    let (_, app) = spawn_app().await;

    let created = create_movie(&app, &[("name", "Arrival")]).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/catalog/admin/movies/{id}"),
            &[("name", "Arrival"), ("description", "First contact.")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["data"]["slug"], "arrival");
    assert_eq!(body["data"]["description"], "First contact.");

    // A real rename moves the slug, excluding self from the collision scan.
    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/catalog/admin/movies/{id}"),
            &[("name", "Arrival 2")],
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["slug"], "arrival-2");
}

#[tokio::test]
async fn partial_update_leaves_absent_fields_alone() {
    let (_, app) = spawn_app().await;

    let created = create_movie(
        &app,
        &[
            ("name", "Blade Runner"),
            ("description", "Replicants."),
            ("priceStandard", "80000"),
        ],
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(multipart_request(
            "PUT",
            &format!("/api/catalog/admin/movies/{id}"),
            &[("priceVip", "90000")],
        ))
        .await
        .unwrap();
    let body = json_body(response).await;

    let movie = &body["data"];
    assert_eq!(movie["name"], "Blade Runner");
    assert_eq!(movie["description"], "Replicants.");
    assert_eq!(movie["prices"]["standard"], 80_000);
    assert_eq!(movie["prices"]["vip"], 90_000);
}

#[tokio::test]
async fn soft_delete_hides_movie_but_keeps_the_row() {
    let (state, app) = spawn_app().await;

    let created = create_movie(&app, &[("name", "Ghost Film")]).await;
    let id = i32::try_from(created["data"]["id"].as_i64().unwrap()).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/catalog/admin/movies/{id}"))
                .header("X-Account-Id", "admin-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone from the read paths...
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/catalog/admin/movies/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/movies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["pagination"]["totalRecords"], 0);

    // ...but still present in storage, flagged.
    let row = state
        .store()
        .get_movie_row(id)
        .await
        .unwrap()
        .expect("row should survive soft delete");
    assert!(row.deleted);
    assert!(row.deleted_at.is_some());
    assert_eq!(row.deleted_by.as_deref(), Some("admin-1"));

    // Deleting again is a 404, not a double delete.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/catalog/admin/movies/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn change_multi_bulk_updates_and_soft_deletes() {
    let (state, app) = spawn_app().await;

    let a = create_movie(&app, &[("name", "Batch A")]).await;
    let b = create_movie(&app, &[("name", "Batch B")]).await;
    let id_a = a["data"]["id"].as_i64().unwrap();
    let id_b = b["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/catalog/admin/movies/change-multi")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"option": "inactive", "ids": [id_a, id_b]}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/movies?status=inactive")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["pagination"]["totalRecords"], 2);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/catalog/admin/movies/change-multi")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"option": "delete", "ids": [id_a]}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = state
        .store()
        .get_movie_row(i32::try_from(id_a).unwrap())
        .await
        .unwrap()
        .expect("batch delete keeps the row");
    assert!(row.deleted);
}

#[tokio::test]
async fn change_multi_rejects_bad_input() {
    let (_, app) = spawn_app().await;

    for payload in [
        serde_json::json!({"option": "archive", "ids": [1]}),
        serde_json::json!({"option": "active", "ids": []}),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/catalog/admin/movies/change-multi")
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn category_crud_flow() {
    let (state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/catalog/admin/categories")
                .header("Content-Type", "application/json")
                .header("X-Account-Id", "admin-1")
                .body(Body::from(
                    serde_json::json!({"name": "Science Fiction"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["slug"], "science-fiction");
    assert_eq!(body["data"]["position"], 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/catalog/admin/categories/{id}"))
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({"name": "Sci-Fi"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["slug"], "sci-fi");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/catalog/admin/categories/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["pagination"]["totalRecords"], 0);

    // Soft delete: the row survives, flagged.
    let row = state
        .store()
        .get_category_row(i32::try_from(id).unwrap())
        .await
        .unwrap()
        .expect("category row should survive soft delete");
    assert!(row.deleted);
}

#[tokio::test]
async fn theater_listing_returns_active_cinemas() {
    let (state, app) = spawn_app().await;

    marquee::seed::seed_cinemas(state.store()).await.unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/admin/theaters")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let theaters = body["data"].as_array().unwrap();
    assert_eq!(theaters.len(), 3);
    assert!(theaters[0]["name"].is_string());
    assert!(theaters[0]["id"].is_number());
}

#[tokio::test]
async fn system_status_reports_counts() {
    let (_, app) = spawn_app().await;

    create_movie(&app, &[("name", "Status Check")]).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/system/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["data"]["movies"], 1);
    assert_eq!(body["data"]["name"], "marquee");
}
