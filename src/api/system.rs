use axum::{Json, extract::State};
use std::sync::Arc;

use crate::api::types::SystemStatus;
use crate::api::{ApiError, ApiResponse, AppState};

pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let (movies, categories, theaters) = tokio::join!(
        state.store().count_movies(),
        state.store().count_categories(),
        state.store().count_cinemas(),
    );

    Ok(Json(ApiResponse::success(SystemStatus {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.start_time.elapsed().as_secs(),
        movies: movies.map_err(|e| ApiError::internal(e.to_string()))?,
        categories: categories.map_err(|e| ApiError::internal(e.to_string()))?,
        theaters: theaters.map_err(|e| ApiError::internal(e.to_string()))?,
    })))
}
