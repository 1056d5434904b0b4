//! `SeaORM` implementation of the [`MovieService`] trait.
//!
//! Slug uniqueness is enforced by a partial unique index; the write paths
//! rescan and retry when a concurrent write steals the candidate slug.

use crate::api::types::{AdminMovieDto, ClientMovieDto, MoviePage, PaginationDto};
use crate::catalog::Page;
use crate::catalog::dates;
use crate::catalog::slug::{slugify, with_suffix};
use crate::db::{Store, is_unique_violation};
use crate::models::movie::{Movie, MovieDraft, MovieFilter, MoviePatch, Prices};
use crate::models::BatchAction;
use crate::services::movie_service::{
    CatalogError, ClientSort, MovieService, movie_to_admin_dto, movie_to_client_dto,
};
use std::collections::HashSet;

/// Attempts before giving up on a slug that keeps colliding under
/// concurrent writes.
const SLUG_RETRY_LIMIT: u32 = 5;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Smallest free suffix for the base slug among non-deleted movies,
    /// excluding the document being renamed.
    async fn next_free_slug(
        &self,
        base: &str,
        exclude_id: Option<i32>,
    ) -> Result<String, CatalogError> {
        let taken: HashSet<String> = self
            .store
            .movie_slugs_with_prefix(base, exclude_id)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .into_iter()
            .collect();

        let mut counter = 0;
        loop {
            let candidate = with_suffix(base, counter);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    fn base_slug(name: &str) -> String {
        let base = slugify(name);
        if base.is_empty() {
            // A name of pure non-ASCII still needs a usable slug.
            "movie".to_string()
        } else {
            base
        }
    }
}

#[async_trait::async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list_movies(&self, filter: MovieFilter, page: Page) -> Result<MoviePage, CatalogError> {
        let (movies, total_records) = self
            .store
            .list_movies(&filter, page.skip(), page.limit)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(MoviePage {
            movies: movies.into_iter().map(movie_to_admin_dto).collect(),
            pagination: PaginationDto {
                current_page: page.page,
                total_pages: page.total_pages(total_records),
                total_records,
                limit: page.limit,
            },
        })
    }

    async fn get_movie(&self, id: i32) -> Result<AdminMovieDto, CatalogError> {
        let movie = self
            .store
            .get_movie(id)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound("Movie", id))?;

        Ok(movie_to_admin_dto(movie))
    }

    async fn create_movie(
        &self,
        draft: MovieDraft,
        actor: Option<String>,
    ) -> Result<AdminMovieDto, CatalogError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "Movie name cannot be empty".to_string(),
            ));
        }

        let position = match draft.position {
            Some(position) => position,
            None => {
                let total = self
                    .store
                    .count_movies()
                    .await
                    .map_err(|e| CatalogError::Database(e.to_string()))?;
                i32::try_from(total).unwrap_or(i32::MAX - 1) + 1
            }
        };

        let defaults = Prices::default();
        let now = dates::now_rfc3339();

        let mut movie = Movie {
            id: 0,
            name: name.clone(),
            slug: String::new(),
            description: draft.description,
            avatar: draft.avatar,
            images: draft.images,
            category_id: draft.category_id,
            release_date: draft.release_date,
            duration: draft.duration,
            rated: draft.rated,
            age_rating: draft.age_rating,
            language: draft.language,
            director: draft.director,
            prices: Prices {
                standard: draft.price_standard.unwrap_or(defaults.standard),
                vip: draft.price_vip.unwrap_or(defaults.vip),
                couple: draft.price_couple.unwrap_or(defaults.couple),
            },
            showtimes: draft.showtimes.unwrap_or_default(),
            position,
            status: draft.status.unwrap_or_else(|| "active".to_string()),
            created_by: actor.clone(),
            updated_by: actor,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };

        let base = Self::base_slug(&name);
        for attempt in 0..SLUG_RETRY_LIMIT {
            movie.slug = self.next_free_slug(&base, None).await?;

            match self.store.insert_movie(&movie).await {
                Ok(created) => return Ok(movie_to_admin_dto(created)),
                Err(e) if is_unique_violation(&e) && attempt + 1 < SLUG_RETRY_LIMIT => {
                    tracing::debug!("Slug {} taken concurrently, retrying", movie.slug);
                }
                Err(e) => return Err(CatalogError::Database(e.to_string())),
            }
        }

        Err(CatalogError::Database(format!(
            "Could not allocate a unique slug for '{base}'"
        )))
    }

    async fn update_movie(
        &self,
        id: i32,
        patch: MoviePatch,
        actor: Option<String>,
    ) -> Result<AdminMovieDto, CatalogError> {
        let mut movie = self
            .store
            .get_movie(id)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound("Movie", id))?;

        // The slug only moves when the name actually changes.
        let mut rename_base = None;
        if let Some(name) = &patch.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() && trimmed != movie.name {
                movie.name = trimmed.to_string();
                rename_base = Some(Self::base_slug(trimmed));
            }
        }

        if let Some(description) = patch.description {
            movie.description = Some(description);
        }
        if let Some(avatar) = patch.avatar {
            movie.avatar = Some(avatar);
        }
        if let Some(images) = patch.images {
            movie.images = images;
        }
        if let Some(category_id) = patch.category_id {
            movie.category_id = Some(category_id);
        }
        if let Some(release_date) = patch.release_date {
            movie.release_date = Some(release_date);
        }
        if let Some(duration) = patch.duration {
            movie.duration = Some(duration);
        }
        if let Some(rated) = patch.rated {
            movie.rated = Some(rated);
        }
        if let Some(age_rating) = patch.age_rating {
            movie.age_rating = Some(age_rating);
        }
        if let Some(language) = patch.language {
            movie.language = Some(language);
        }
        if let Some(director) = patch.director {
            movie.director = Some(director);
        }
        if let Some(standard) = patch.price_standard {
            movie.prices.standard = standard;
        }
        if let Some(vip) = patch.price_vip {
            movie.prices.vip = vip;
        }
        if let Some(couple) = patch.price_couple {
            movie.prices.couple = couple;
        }
        if let Some(showtimes) = patch.showtimes {
            movie.showtimes = showtimes;
        }
        if let Some(position) = patch.position {
            movie.position = position;
        }
        if let Some(status) = patch.status {
            movie.status = status;
        }

        movie.updated_by = actor;
        movie.updated_at = Some(dates::now_rfc3339());

        if let Some(base) = rename_base {
            for attempt in 0..SLUG_RETRY_LIMIT {
                movie.slug = self.next_free_slug(&base, Some(id)).await?;

                match self.store.update_movie(&movie).await {
                    Ok(updated) => return Ok(movie_to_admin_dto(updated)),
                    Err(e) if is_unique_violation(&e) && attempt + 1 < SLUG_RETRY_LIMIT => {
                        tracing::debug!("Slug {} taken concurrently, retrying", movie.slug);
                    }
                    Err(e) => return Err(CatalogError::Database(e.to_string())),
                }
            }

            return Err(CatalogError::Database(format!(
                "Could not allocate a unique slug for '{}'",
                movie.name
            )));
        }

        let updated = self
            .store
            .update_movie(&movie)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(movie_to_admin_dto(updated))
    }

    async fn delete_movie(&self, id: i32, actor: Option<String>) -> Result<(), CatalogError> {
        let removed = self
            .store
            .soft_delete_movie(id, &dates::now_rfc3339(), actor.as_deref())
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if removed {
            Ok(())
        } else {
            Err(CatalogError::NotFound("Movie", id))
        }
    }

    async fn change_multi(
        &self,
        action: BatchAction,
        ids: &[i32],
        actor: Option<String>,
    ) -> Result<u64, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::Validation("No ids provided".to_string()));
        }

        self.store
            .apply_movie_batch(action, ids, &dates::now_rfc3339(), actor.as_deref())
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    async fn browse_movies(
        &self,
        category_id: Option<i32>,
        keyword: Option<&str>,
        sort: ClientSort,
    ) -> Result<Vec<ClientMovieDto>, CatalogError> {
        let rows = self
            .store
            .list_client_movies(category_id, keyword)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let mut movies: Vec<ClientMovieDto> = rows
            .into_iter()
            .map(|(movie, category)| movie_to_client_dto(movie, category))
            .collect();

        // The fetch comes back created_at-descending; the overrides reorder
        // the formatted list in memory.
        match sort {
            ClientSort::PriceAsc => movies.sort_by_key(|m| m.price),
            ClientSort::PriceDesc => movies.sort_by_key(|m| std::cmp::Reverse(m.price)),
            ClientSort::Name => movies.sort_by(|a, b| a.name.cmp(&b.name)),
            ClientSort::Latest => {}
        }

        Ok(movies)
    }

    async fn movie_details(&self, id: i32) -> Result<ClientMovieDto, CatalogError> {
        let (movie, category) = self
            .store
            .get_movie_with_category(id)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound("Movie", id))?;

        Ok(movie_to_client_dto(movie, category))
    }
}
