use axum::{Json, extract::State};
use std::sync::Arc;

use crate::api::types::TheaterDto;
use crate::api::{ApiError, ApiResponse, AppState};

/// Active theaters, id and name only: the admin UI's showtime dropdown.
pub async fn list_theaters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TheaterDto>>>, ApiError> {
    let theaters = state
        .store()
        .list_active_cinemas()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .into_iter()
        .map(|cinema| TheaterDto {
            id: cinema.id,
            name: cinema.name,
        })
        .collect();

    Ok(Json(ApiResponse::success(theaters)))
}
