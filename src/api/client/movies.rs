use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::types::{BookedSeatsResponse, ClientMovieDto};
use crate::api::validation::validate_id;
use crate::api::{ApiError, ApiResponse, AppState};
use crate::clients::SeatQuery;
use crate::services::ClientSort;

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub category: Option<i32>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
}

pub async fn browse_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<ApiResponse<Vec<ClientMovieDto>>>, ApiError> {
    let keyword = params
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let movies = state
        .movies()
        .browse_movies(
            params.category,
            keyword,
            ClientSort::parse(params.sort.as_deref()),
        )
        .await?;

    Ok(Json(ApiResponse::success(movies)))
}

pub async fn movie_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ClientMovieDto>>, ApiError> {
    validate_id(id)?;
    let movie = state.movies().movie_details(id).await?;
    Ok(Json(ApiResponse::success(movie)))
}

#[derive(Debug, Deserialize)]
pub struct SeatParams {
    pub cinema: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// Relays the booked-seat list for one showing. Missing parameters are
/// reported in-band; upstream failures fail open with an empty list.
pub async fn booked_seats(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
    Query(params): Query<SeatParams>,
) -> Response {
    let (Some(cinema), Some(date), Some(time)) = (params.cinema, params.date, params.time) else {
        return Json(ApiResponse::<()>::error("Missing required information")).into_response();
    };

    let query = SeatQuery {
        movie_id,
        cinema,
        date,
        time,
    };

    let booked_seats = state.seats().booked_seats(&query).await;

    Json(BookedSeatsResponse {
        code: "success",
        booked_seats,
    })
    .into_response()
}
