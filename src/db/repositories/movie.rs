use crate::entities::{categories, movies, prelude::*};
use crate::models::movie::{Movie, MovieFilter, Prices};
use crate::models::{BatchAction, Category};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn map_model_to_movie(model: movies::Model) -> Movie {
        Movie {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            avatar: model.avatar,
            images: model
                .images
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            category_id: model.category_id,
            release_date: model.release_date,
            duration: model.duration,
            rated: model.rated,
            age_rating: model.age_rating,
            language: model.language,
            director: model.director,
            prices: Prices {
                standard: model.price_standard,
                vip: model.price_vip,
                couple: model.price_couple,
            },
            showtimes: model
                .showtimes
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            position: model.position,
            status: model.status,
            created_by: model.created_by,
            updated_by: model.updated_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn active_model_from_movie(movie: &Movie) -> movies::ActiveModel {
        movies::ActiveModel {
            name: Set(movie.name.clone()),
            slug: Set(movie.slug.clone()),
            description: Set(movie.description.clone()),
            avatar: Set(movie.avatar.clone()),
            images: Set(serde_json::to_string(&movie.images).ok()),
            category_id: Set(movie.category_id),
            release_date: Set(movie.release_date.clone()),
            duration: Set(movie.duration),
            rated: Set(movie.rated.clone()),
            age_rating: Set(movie.age_rating.clone()),
            language: Set(movie.language.clone()),
            director: Set(movie.director.clone()),
            price_standard: Set(movie.prices.standard),
            price_vip: Set(movie.prices.vip),
            price_couple: Set(movie.prices.couple),
            showtimes: Set(serde_json::to_string(&movie.showtimes).ok()),
            position: Set(movie.position),
            status: Set(movie.status.clone()),
            created_by: Set(movie.created_by.clone()),
            updated_by: Set(movie.updated_by.clone()),
            created_at: Set(movie.created_at.clone()),
            updated_at: Set(movie.updated_at.clone()),
            ..Default::default()
        }
    }

    fn filter_condition(filter: &MovieFilter) -> Condition {
        let mut condition = Condition::all().add(movies::Column::Deleted.eq(false));

        if let Some(status) = &filter.status {
            condition = condition.add(movies::Column::Status.eq(status.clone()));
        }
        if let Some(created_by) = &filter.created_by {
            condition = condition.add(movies::Column::CreatedBy.eq(created_by.clone()));
        }
        if let Some(after) = &filter.created_after {
            condition = condition.add(movies::Column::CreatedAt.gte(after.clone()));
        }
        if let Some(before) = &filter.created_before {
            condition = condition.add(movies::Column::CreatedAt.lte(before.clone()));
        }
        if let Some(keyword) = &filter.keyword_slug {
            condition = condition.add(movies::Column::Slug.contains(keyword.clone()));
        }

        condition
    }

    /// Count and page fetch share the same condition; a write racing between
    /// the two queries can skew the page count, which is accepted.
    pub async fn list(
        &self,
        filter: &MovieFilter,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<(Vec<Movie>, u64)> {
        let condition = Self::filter_condition(filter);

        let total_records = Movies::find()
            .filter(condition.clone())
            .count(&self.conn)
            .await?;

        let rows = Movies::find()
            .filter(condition)
            .order_by_desc(movies::Column::Position)
            .offset(skip)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok((
            rows.into_iter().map(Self::map_model_to_movie).collect(),
            total_records,
        ))
    }

    pub async fn get_live(&self, id: i32) -> anyhow::Result<Option<Movie>> {
        let row = Movies::find_by_id(id)
            .filter(movies::Column::Deleted.eq(false))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model_to_movie))
    }

    /// Raw row including soft-deleted ones, for store inspection.
    pub async fn get_row(&self, id: i32) -> anyhow::Result<Option<movies::Model>> {
        Ok(Movies::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_live_with_category(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<(Movie, Option<Category>)>> {
        let row = Movies::find_by_id(id)
            .filter(movies::Column::Deleted.eq(false))
            .find_also_related(categories::Entity)
            .one(&self.conn)
            .await?;

        Ok(row.map(|(movie, category)| {
            (
                Self::map_model_to_movie(movie),
                category.map(super::category::CategoryRepository::map_model_to_category),
            )
        }))
    }

    /// Active, non-deleted movies for the client listing, newest first.
    pub async fn list_client(
        &self,
        category_id: Option<i32>,
        keyword: Option<&str>,
    ) -> anyhow::Result<Vec<(Movie, Option<Category>)>> {
        let mut condition = Condition::all()
            .add(movies::Column::Deleted.eq(false))
            .add(movies::Column::Status.eq("active"));

        if let Some(category_id) = category_id {
            condition = condition.add(movies::Column::CategoryId.eq(category_id));
        }
        if let Some(keyword) = keyword {
            // SQLite LIKE is case-insensitive over ASCII, which is the
            // storefront search contract.
            condition = condition.add(
                Condition::any()
                    .add(movies::Column::Name.contains(keyword))
                    .add(movies::Column::Description.contains(keyword)),
            );
        }

        let rows = Movies::find()
            .filter(condition)
            .order_by_desc(movies::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(movie, category)| {
                (
                    Self::map_model_to_movie(movie),
                    category.map(super::category::CategoryRepository::map_model_to_category),
                )
            })
            .collect())
    }

    pub async fn count_live(&self) -> anyhow::Result<u64> {
        Ok(Movies::find()
            .filter(movies::Column::Deleted.eq(false))
            .count(&self.conn)
            .await?)
    }

    /// Slugs of non-deleted movies sharing the given prefix, optionally
    /// excluding one id (the document being renamed).
    pub async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude_id: Option<i32>,
    ) -> anyhow::Result<Vec<String>> {
        let mut query = Movies::find()
            .select_only()
            .column(movies::Column::Slug)
            .filter(movies::Column::Deleted.eq(false))
            .filter(movies::Column::Slug.starts_with(prefix));

        if let Some(id) = exclude_id {
            query = query.filter(movies::Column::Id.ne(id));
        }

        Ok(query.into_tuple::<String>().all(&self.conn).await?)
    }

    pub async fn insert(&self, movie: &Movie) -> anyhow::Result<Movie> {
        let mut active = Self::active_model_from_movie(movie);
        active.deleted = Set(false);

        let result = Movies::insert(active).exec(&self.conn).await?;

        let created = Movies::find_by_id(result.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("movie {} vanished after insert", result.last_insert_id))?;

        info!("Created movie: {} ({})", created.name, created.slug);
        Ok(Self::map_model_to_movie(created))
    }

    /// Persists the already-merged movie record under its existing id.
    pub async fn update(&self, movie: &Movie) -> anyhow::Result<Movie> {
        let mut active = Self::active_model_from_movie(movie);
        active.id = Set(movie.id);
        // created_by/created_at are immutable once written.
        active.created_by = sea_orm::ActiveValue::NotSet;
        active.created_at = sea_orm::ActiveValue::NotSet;

        let updated = active.update(&self.conn).await?;
        Ok(Self::map_model_to_movie(updated))
    }

    pub async fn soft_delete(
        &self,
        id: i32,
        deleted_at: &str,
        deleted_by: Option<&str>,
    ) -> anyhow::Result<bool> {
        let result = Movies::update_many()
            .col_expr(movies::Column::Deleted, sea_orm::sea_query::Expr::value(true))
            .col_expr(
                movies::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(deleted_at),
            )
            .col_expr(
                movies::Column::DeletedBy,
                sea_orm::sea_query::Expr::value(deleted_by),
            )
            .filter(movies::Column::Id.eq(id))
            .filter(movies::Column::Deleted.eq(false))
            .exec(&self.conn)
            .await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Soft-deleted movie {}", id);
        }
        Ok(removed)
    }

    /// Applies a batch action over the matching non-deleted rows and returns
    /// how many were touched.
    pub async fn apply_batch(
        &self,
        action: BatchAction,
        ids: &[i32],
        stamp: &str,
        actor: Option<&str>,
    ) -> anyhow::Result<u64> {
        let base = Movies::update_many()
            .filter(movies::Column::Id.is_in(ids.iter().copied()))
            .filter(movies::Column::Deleted.eq(false));

        let result = if let Some(status) = action.status() {
            base.col_expr(
                movies::Column::Status,
                sea_orm::sea_query::Expr::value(status),
            )
            .col_expr(
                movies::Column::UpdatedBy,
                sea_orm::sea_query::Expr::value(actor),
            )
            .col_expr(
                movies::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(stamp),
            )
            .exec(&self.conn)
            .await?
        } else {
            base.col_expr(movies::Column::Deleted, sea_orm::sea_query::Expr::value(true))
                .col_expr(
                    movies::Column::DeletedAt,
                    sea_orm::sea_query::Expr::value(stamp),
                )
                .col_expr(
                    movies::Column::DeletedBy,
                    sea_orm::sea_query::Expr::value(actor),
                )
                .exec(&self.conn)
                .await?
        };

        Ok(result.rows_affected)
    }
}

/// Detects the partial-unique-index conflict the slug retry loop recovers
/// from, anywhere in the error chain.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.to_string().contains("UNIQUE constraint failed"))
}
