//! Client browsing flows and the fail-open seat lookup.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use marquee::config::Config;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

const BOUNDARY: &str = "marquee-test-boundary";

async fn spawn_app() -> (Arc<marquee::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("marquee-client-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.uploads.path = std::env::temp_dir()
        .join(format!("marquee-uploads-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();
    // Nothing listens here; seat lookups must fail open, and quickly.
    config.booking.base_url = "http://127.0.0.1:59999".to_string();
    config.booking.request_timeout_seconds = 2;

    let state = marquee::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = marquee::api::router(state.clone()).await;
    (state, router)
}

fn multipart_request(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
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

async fn browse(app: &Router, query: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/catalog/client/movies{query}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

#[tokio::test]
async fn browse_shows_only_active_movies() {
    let (_, app) = spawn_app().await;

    create_movie(&app, &[("name", "Visible")]).await;
    create_movie(&app, &[("name", "Hidden"), ("status", "inactive")]).await;
    let deleted = create_movie(&app, &[("name", "Removed")]).await;
    let deleted_id = deleted["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/catalog/admin/movies/{deleted_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = browse(&app, "").await;
    let movies = body["data"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["name"], "Visible");
}

#[tokio::test]
async fn browse_sorts_by_price_and_name() {
    let (_, app) = spawn_app().await;

    create_movie(&app, &[("name", "Cheap"), ("priceStandard", "30000")]).await;
    create_movie(&app, &[("name", "Expensive"), ("priceStandard", "90000")]).await;
    create_movie(&app, &[("name", "Average"), ("priceStandard", "60000")]).await;

    let body = browse(&app, "?sort=price-asc").await;
    let prices: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["price"].as_i64().unwrap())
        .collect();
    assert_eq!(prices, vec![30_000, 60_000, 90_000]);

    let body = browse(&app, "?sort=price-desc").await;
    let prices: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["price"].as_i64().unwrap())
        .collect();
    assert_eq!(prices, vec![90_000, 60_000, 30_000]);

    let body = browse(&app, "?sort=name").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Average", "Cheap", "Expensive"]);
}

#[tokio::test]
async fn browse_keyword_searches_name_and_description() {
    let (_, app) = spawn_app().await;

    create_movie(&app, &[("name", "Solaris")]).await;
    create_movie(
        &app,
        &[("name", "Stalker"), ("description", "A journey to the Zone")],
    )
    .await;
    create_movie(&app, &[("name", "Heat")]).await;

    // Case-insensitive match against the name.
    let body = browse(&app, "?keyword=solaris").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Match against the description.
    let body = browse(&app, "?keyword=Zone").await;
    let movies = body["data"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["name"], "Stalker");
}

#[tokio::test]
async fn browse_filters_by_category() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/catalog/admin/categories")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({"name": "Drama"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let category = json_body(response).await;
    let category_id = category["data"]["id"].as_i64().unwrap();

    let category_id_text = category_id.to_string();
    create_movie(
        &app,
        &[("name", "In Category"), ("categoryId", category_id_text.as_str())],
    )
    .await;
    create_movie(&app, &[("name", "Uncategorized")]).await;

    let body = browse(&app, &format!("?category={category_id}")).await;
    let movies = body["data"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["name"], "In Category");
    assert_eq!(movies[0]["category"]["name"], "Drama");
}

#[tokio::test]
async fn detail_returns_populated_movie_or_404() {
    let (_, app) = spawn_app().await;

    let created = create_movie(
        &app,
        &[
            ("name", "Detail Movie"),
            ("duration", "148"),
            ("director", "Someone"),
            (
                "showtimes",
                r#"[{"cinema_id":1,"date":"2026-09-01","times":["18:00","21:00"],"format":"IMAX"}]"#,
            ),
        ],
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/catalog/client/movies/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let movie = &body["data"];
    assert_eq!(movie["duration"], 148);
    assert_eq!(movie["showtimes"].as_array().unwrap().len(), 1);
    assert_eq!(movie["showtimes"][0]["times"][1], "21:00");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/client/movies/999999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_showtimes_degrade_to_empty_on_create() {
    let (_, app) = spawn_app().await;

    let created = create_movie(
        &app,
        &[("name", "Broken Showtimes"), ("showtimes", "{not json")],
    )
    .await;

    assert_eq!(created["data"]["showtimes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn booked_seats_requires_all_parameters() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/client/movies/booked-seats/1?cinema=1&date=2026-09-01")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // In-band error, matching the original wire contract.
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["code"], "error");
}

#[tokio::test]
async fn booked_seats_fails_open_when_booking_service_is_down() {
    let (_, app) = spawn_app().await;

    let start = Instant::now();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(
                    "/api/catalog/client/movies/booked-seats/1?cinema=1&date=2026-09-01&time=18:00",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["code"], "success");
    assert_eq!(body["bookedSeats"].as_array().unwrap().len(), 0);
    // Bounded by the configured timeout, with some scheduling slack.
    assert!(start.elapsed().as_secs() < 5);
}

#[tokio::test]
async fn category_tree_nests_children() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/catalog/admin/categories")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::json!({"name": "Genres"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let parent = json_body(response).await;
    let parent_id = parent["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/catalog/admin/categories")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"name": "Horror", "parentId": parent_id}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/catalog/client/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let tree = body["data"].as_array().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["name"], "Genres");
    assert_eq!(tree[0]["children"][0]["name"], "Horror");
}
