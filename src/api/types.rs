use crate::models::movie::{Prices, Showtime};
use serde::{Deserialize, Serialize};

/// The wire envelope every catalog endpoint speaks:
/// `{code: "success"|"error", message?, data?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            code: "success",
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: "success",
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: "success",
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: "error",
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_records: u64,
    pub limit: u64,
}

/// One admin listing page: the movies plus their pagination frame.
#[derive(Debug, Serialize)]
pub struct MoviePage {
    pub movies: Vec<AdminMovieDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMovieDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub images: Vec<String>,
    pub category_id: Option<i32>,
    pub release_date: Option<String>,
    pub release_date_format: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub prices: Prices,
    pub showtimes: Vec<Showtime>,
    pub position: i32,
    pub status: String,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: Option<String>,
    pub created_at_format: Option<String>,
    pub updated_at: Option<String>,
    pub updated_at_format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRefDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMovieDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub avatar: Option<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub release_date_format: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub category: Option<CategoryRefDto>,
    /// Standard ticket price, the value the client sort keys on.
    pub price: i64,
    pub prices: Prices,
    pub showtimes: Vec<Showtime>,
    pub status: String,
}

/// Booked-seats relay; `{code:"success", bookedSeats:[…]}` even when the
/// upstream lookup failed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedSeatsResponse {
    pub code: &'static str,
    pub booked_seats: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TheaterDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeMultiRequest {
    pub option: String,
    #[serde(default)]
    pub ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub name: &'static str,
    pub version: &'static str,
    pub uptime: u64,
    pub movies: u64,
    pub categories: u64,
    pub theaters: u64,
}
