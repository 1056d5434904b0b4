use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::movies::AdminListParams;
use crate::api::validation::{validate_batch_request, validate_id};
use crate::api::{ApiError, ApiResponse, AppState, actor_from_headers};
use crate::api::types::{ChangeMultiRequest, PaginationDto};
use crate::models::Category;
use crate::models::category::{CategoryDraft, CategoryPatch};

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub categories: Vec<Category>,
    pub pagination: PaginationDto,
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminListParams>,
) -> Result<Json<ApiResponse<CategoryPage>>, ApiError> {
    let page = params.to_page();
    let (categories, total_records) = state
        .categories()
        .list(params.to_filter(), page)
        .await?;

    Ok(Json(ApiResponse::success(CategoryPage {
        categories,
        pagination: PaginationDto {
            current_page: page.page,
            total_pages: page.total_pages(total_records),
            total_records,
            limit: page.limit,
        },
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub parent_id: Option<i32>,
    pub avatar: Option<String>,
    pub position: Option<i32>,
    pub status: Option<String>,
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let actor = actor_from_headers(&headers);

    let draft = CategoryDraft {
        name: payload.name.unwrap_or_default(),
        parent_id: payload.parent_id,
        avatar: payload.avatar,
        position: payload.position,
        status: payload.status,
    };

    let created = state.categories().create(draft, actor).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Category created",
            created,
        )),
    ))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    validate_id(id)?;
    let actor = actor_from_headers(&headers);

    let patch = CategoryPatch {
        name: payload.name,
        parent_id: payload.parent_id,
        avatar: payload.avatar,
        position: payload.position,
        status: payload.status,
    };

    let updated = state.categories().update(id, patch, actor).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Category updated",
        updated,
    )))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    let actor = actor_from_headers(&headers);

    state.categories().delete(id, actor).await?;

    Ok(Json(ApiResponse::message("Category deleted")))
}

pub async fn change_multi(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChangeMultiRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let action = validate_batch_request(&payload.option, &payload.ids)?;
    let actor = actor_from_headers(&headers);

    let touched = state
        .categories()
        .change_multi(action, &payload.ids, actor)
        .await?;

    Ok(Json(ApiResponse::message(format!(
        "Applied {} to {} categories",
        payload.option, touched
    ))))
}
