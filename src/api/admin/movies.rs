use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::validation::{validate_batch_request, validate_id};
use crate::api::{ApiError, ApiResponse, AppState, actor_from_headers};
use crate::api::types::{AdminMovieDto, ChangeMultiRequest, MoviePage};
use crate::catalog::Page;
use crate::catalog::{dates, slug};
use crate::models::movie::{MovieDraft, MovieFilter, MoviePatch, Showtime};
use crate::services::UploadService;

const MAX_IMAGES: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListParams {
    pub status: Option<String>,
    pub created_by: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub keyword: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl AdminListParams {
    /// Shared by movies and categories: same filters, same lenient parsing
    /// (an unparsable date bound is ignored rather than rejected).
    pub fn to_filter(&self) -> MovieFilter {
        MovieFilter {
            status: self.status.clone().filter(|s| !s.is_empty()),
            created_by: self.created_by.clone().filter(|s| !s.is_empty()),
            created_after: self.start_date.as_deref().and_then(dates::start_of_day),
            created_before: self.end_date.as_deref().and_then(dates::end_of_day),
            keyword_slug: self
                .keyword
                .as_deref()
                .map(slug::slugify)
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn to_page(&self) -> Page {
        Page::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminListParams>,
) -> Result<Json<ApiResponse<MoviePage>>, ApiError> {
    let page = state
        .movies()
        .list_movies(params.to_filter(), params.to_page())
        .await?;

    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AdminMovieDto>>, ApiError> {
    validate_id(id)?;
    let movie = state.movies().get_movie(id).await?;
    Ok(Json(ApiResponse::success(movie)))
}

/// Everything a multipart movie form can carry. File parts are persisted as
/// they stream past; text parts land as raw strings for the caller to shape.
#[derive(Debug, Default)]
pub(crate) struct MovieForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub release_date: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub price_standard: Option<i64>,
    pub price_vip: Option<i64>,
    pub price_couple: Option<i64>,
    pub showtimes_raw: Option<String>,
    pub status: Option<String>,
    pub position: Option<i32>,
    pub avatar: Option<String>,
    pub images: Vec<String>,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) async fn read_movie_form(
    uploads: &UploadService,
    multipart: &mut Multipart,
) -> Result<MovieForm, ApiError> {
    let mut form = MovieForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "avatar" => {
                let filename = field.file_name().unwrap_or("avatar.jpg").to_string();
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                if bytes.is_empty() {
                    continue;
                }
                let path = uploads
                    .save(content_type.as_deref(), &filename, &bytes)
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                form.avatar = Some(path);
            }
            "images" => {
                if form.images.len() >= MAX_IMAGES {
                    return Err(ApiError::validation(format!(
                        "At most {MAX_IMAGES} images are accepted"
                    )));
                }
                let filename = field.file_name().unwrap_or("image.jpg").to_string();
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                if bytes.is_empty() {
                    continue;
                }
                let path = uploads
                    .save(content_type.as_deref(), &filename, &bytes)
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                form.images.push(path);
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(e.to_string()))?;

                match name.as_str() {
                    "name" => form.name = non_empty(value),
                    "description" => form.description = non_empty(value),
                    "categoryId" => form.category_id = value.trim().parse().ok(),
                    "releaseDate" => form.release_date = non_empty(value),
                    "duration" => form.duration = value.trim().parse().ok(),
                    "rated" => form.rated = non_empty(value),
                    "ageRating" => form.age_rating = non_empty(value),
                    "language" => form.language = non_empty(value),
                    "director" => form.director = non_empty(value),
                    "priceStandard" => form.price_standard = value.trim().parse().ok(),
                    "priceVip" => form.price_vip = value.trim().parse().ok(),
                    "priceCouple" => form.price_couple = value.trim().parse().ok(),
                    "showtimes" => form.showtimes_raw = non_empty(value),
                    "status" => form.status = non_empty(value),
                    "position" => form.position = value.trim().parse().ok(),
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AdminMovieDto>>), ApiError> {
    let actor = actor_from_headers(&headers);
    let form = read_movie_form(state.uploads(), &mut multipart).await?;

    // A malformed showtimes payload degrades to an empty schedule.
    let showtimes = form
        .showtimes_raw
        .as_deref()
        .map(|raw| serde_json::from_str::<Vec<Showtime>>(raw).unwrap_or_default());

    let draft = MovieDraft {
        name: form.name.unwrap_or_default(),
        description: form.description,
        avatar: form.avatar,
        images: form.images,
        category_id: form.category_id,
        release_date: form.release_date,
        duration: form.duration,
        rated: form.rated,
        age_rating: form.age_rating,
        language: form.language,
        director: form.director,
        price_standard: form.price_standard,
        price_vip: form.price_vip,
        price_couple: form.price_couple,
        showtimes,
        position: form.position,
        status: form.status,
    };

    let created = state.movies().create_movie(draft, actor).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Movie created",
            created,
        )),
    ))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AdminMovieDto>>, ApiError> {
    validate_id(id)?;
    let actor = actor_from_headers(&headers);
    let form = read_movie_form(state.uploads(), &mut multipart).await?;

    // Unlike create, a malformed showtimes payload keeps the stored list.
    let showtimes = form
        .showtimes_raw
        .as_deref()
        .and_then(|raw| serde_json::from_str::<Vec<Showtime>>(raw).ok());

    let patch = MoviePatch {
        name: form.name,
        description: form.description,
        avatar: form.avatar,
        images: if form.images.is_empty() {
            None
        } else {
            Some(form.images)
        },
        category_id: form.category_id,
        release_date: form.release_date,
        duration: form.duration,
        rated: form.rated,
        age_rating: form.age_rating,
        language: form.language,
        director: form.director,
        price_standard: form.price_standard,
        price_vip: form.price_vip,
        price_couple: form.price_couple,
        showtimes,
        position: form.position,
        status: form.status,
    };

    let updated = state.movies().update_movie(id, patch, actor).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Movie updated",
        updated,
    )))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    let actor = actor_from_headers(&headers);

    state.movies().delete_movie(id, actor).await?;

    Ok(Json(ApiResponse::message("Movie deleted")))
}

pub async fn change_multi(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChangeMultiRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let action = validate_batch_request(&payload.option, &payload.ids)?;
    let actor = actor_from_headers(&headers);

    let touched = state
        .movies()
        .change_multi(action, &payload.ids, actor)
        .await?;

    Ok(Json(ApiResponse::message(format!(
        "Applied {} to {} movies",
        payload.option, touched
    ))))
}
