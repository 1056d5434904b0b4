use axum::{Json, extract::State};
use std::sync::Arc;

use crate::api::{ApiError, ApiResponse, AppState};
use crate::models::category::CategoryNode;

/// Active categories as a nested tree for the storefront navigation.
pub async fn category_tree(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryNode>>>, ApiError> {
    let tree = state.categories().tree().await?;
    Ok(Json(ApiResponse::success(tree)))
}
