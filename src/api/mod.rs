use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderMap, HeaderValue},
    middleware,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::upload;
use crate::state::SharedState;

mod admin;
mod client;
mod error;
mod observability;
mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

/// Identity header set by the upstream gateway; auth itself is out of scope
/// here, the value is trusted as the acting account id.
pub const ACCOUNT_HEADER: &str = "x-account-id";

#[must_use]
pub fn actor_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn crate::services::MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn categories(&self) -> &Arc<crate::services::CategoryService> {
        &self.shared.category_service
    }

    #[must_use]
    pub fn seats(&self) -> &Arc<crate::services::SeatService> {
        &self.shared.seat_service
    }

    #[must_use]
    pub fn uploads(&self) -> &Arc<crate::services::UploadService> {
        &self.shared.upload_service
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle).await
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (upload_dir, upload_cap, cors_origins) = {
        let config = state.config().read().await;
        (
            config.uploads.path.clone(),
            config.uploads.max_file_size_bytes,
            config.server.cors_allowed_origins.clone(),
        )
    };

    let admin_routes = Router::new()
        .route("/movies", get(admin::movies::list_movies))
        .route("/movies", post(admin::movies::create_movie))
        .route("/movies/change-multi", patch(admin::movies::change_multi))
        .route("/movies/{id}", get(admin::movies::get_movie))
        .route("/movies/{id}", put(admin::movies::update_movie))
        .route("/movies/{id}", delete(admin::movies::delete_movie))
        .route("/categories", get(admin::categories::list_categories))
        .route("/categories", post(admin::categories::create_category))
        .route(
            "/categories/change-multi",
            patch(admin::categories::change_multi),
        )
        .route("/categories/{id}", patch(admin::categories::update_category))
        .route(
            "/categories/{id}",
            delete(admin::categories::delete_category),
        )
        .route("/theaters", get(admin::theaters::list_theaters));

    let client_routes = Router::new()
        .route("/movies", get(client::movies::browse_movies))
        .route(
            "/movies/booked-seats/{movie_id}",
            get(client::movies::booked_seats),
        )
        .route("/movies/{id}", get(client::movies::movie_details))
        .route("/categories", get(client::categories::category_tree));

    let api_router = Router::new()
        .nest("/admin", admin_routes)
        .nest("/client", client_routes)
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    // Room for a full form: avatar + the image set, plus text fields.
    let body_limit = upload_cap * 12 + 1024 * 1024;

    Router::new()
        .nest("/api/catalog", api_router)
        .nest_service(
            upload::PUBLIC_PREFIX,
            tower_http::services::ServeDir::new(upload_dir),
        )
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
