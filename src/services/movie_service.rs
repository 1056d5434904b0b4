//! Domain service for the movie catalog: listing, browsing, and the write
//! pipeline (create, partial update, soft delete, batch actions).

use crate::api::types::{AdminMovieDto, CategoryRefDto, ClientMovieDto, MoviePage};
use crate::catalog::Page;
use crate::catalog::dates;
use crate::models::movie::{Movie, MovieDraft, MovieFilter, MoviePatch};
use crate::models::{BatchAction, Category};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} {1} not found")]
    NotFound(&'static str, i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// How the client listing orders the already-fetched result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSort {
    PriceAsc,
    PriceDesc,
    Name,
    #[default]
    Latest,
}

impl ClientSort {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("price-asc") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            Some("name") => Self::Name,
            _ => Self::Latest,
        }
    }
}

/// Domain service trait for catalog movie operations, abstracted so handlers
/// stay free of persistence details.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Filtered, paginated admin listing.
    async fn list_movies(&self, filter: MovieFilter, page: Page) -> Result<MoviePage, CatalogError>;

    /// Admin detail view.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for missing or soft-deleted ids.
    async fn get_movie(&self, id: i32) -> Result<AdminMovieDto, CatalogError>;

    /// Creates a movie, deriving slug, position, status, and price defaults.
    async fn create_movie(
        &self,
        draft: MovieDraft,
        actor: Option<String>,
    ) -> Result<AdminMovieDto, CatalogError>;

    /// Applies a partial update; only fields present in the patch change.
    async fn update_movie(
        &self,
        id: i32,
        patch: MoviePatch,
        actor: Option<String>,
    ) -> Result<AdminMovieDto, CatalogError>;

    /// Soft-deletes one movie.
    async fn delete_movie(&self, id: i32, actor: Option<String>) -> Result<(), CatalogError>;

    /// Bulk status change or bulk soft delete; returns the touched row count.
    async fn change_multi(
        &self,
        action: BatchAction,
        ids: &[i32],
        actor: Option<String>,
    ) -> Result<u64, CatalogError>;

    /// Client browse: active movies, optional category/keyword filters,
    /// post-fetch sort.
    async fn browse_movies(
        &self,
        category_id: Option<i32>,
        keyword: Option<&str>,
        sort: ClientSort,
    ) -> Result<Vec<ClientMovieDto>, CatalogError>;

    /// Client detail with populated category.
    async fn movie_details(&self, id: i32) -> Result<ClientMovieDto, CatalogError>;
}

pub(crate) fn category_ref(category: Category) -> CategoryRefDto {
    CategoryRefDto {
        id: category.id,
        name: category.name,
        slug: category.slug,
    }
}

pub(crate) fn movie_to_admin_dto(movie: Movie) -> AdminMovieDto {
    let created_at_format = movie
        .created_at
        .as_deref()
        .and_then(dates::format_timestamp);
    let updated_at_format = movie
        .updated_at
        .as_deref()
        .and_then(dates::format_timestamp);
    let release_date_format = movie.release_date.as_deref().and_then(dates::format_date);

    AdminMovieDto {
        id: movie.id,
        name: movie.name,
        slug: movie.slug,
        description: movie.description,
        avatar: movie.avatar,
        images: movie.images,
        category_id: movie.category_id,
        release_date: movie.release_date,
        release_date_format,
        duration: movie.duration,
        rated: movie.rated,
        age_rating: movie.age_rating,
        language: movie.language,
        director: movie.director,
        prices: movie.prices,
        showtimes: movie.showtimes,
        position: movie.position,
        status: movie.status,
        created_by: movie.created_by.unwrap_or_else(|| "-".to_string()),
        updated_by: movie.updated_by.unwrap_or_else(|| "-".to_string()),
        created_at: movie.created_at,
        created_at_format,
        updated_at: movie.updated_at,
        updated_at_format,
    }
}

pub(crate) fn movie_to_client_dto(movie: Movie, category: Option<Category>) -> ClientMovieDto {
    let release_date_format = movie.release_date.as_deref().and_then(dates::format_date);

    ClientMovieDto {
        id: movie.id,
        name: movie.name,
        slug: movie.slug,
        avatar: movie.avatar,
        images: movie.images,
        description: movie.description,
        release_date: movie.release_date,
        release_date_format,
        duration: movie.duration,
        rated: movie.rated,
        age_rating: movie.age_rating,
        language: movie.language,
        director: movie.director,
        category: category.map(category_ref),
        price: movie.prices.standard,
        prices: movie.prices,
        showtimes: movie.showtimes,
        status: movie.status,
    }
}
