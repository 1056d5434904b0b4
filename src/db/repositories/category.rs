use crate::entities::{categories, prelude::*};
use crate::models::movie::MovieFilter;
use crate::models::{BatchAction, Category};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn map_model_to_category(model: categories::Model) -> Category {
        Category {
            id: model.id,
            name: model.name,
            slug: model.slug,
            parent_id: model.parent_id,
            avatar: model.avatar,
            position: model.position,
            status: model.status,
            created_by: model.created_by,
            updated_by: model.updated_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn active_model_from_category(category: &Category) -> categories::ActiveModel {
        categories::ActiveModel {
            name: Set(category.name.clone()),
            slug: Set(category.slug.clone()),
            parent_id: Set(category.parent_id),
            avatar: Set(category.avatar.clone()),
            position: Set(category.position),
            status: Set(category.status.clone()),
            created_by: Set(category.created_by.clone()),
            updated_by: Set(category.updated_by.clone()),
            created_at: Set(category.created_at.clone()),
            updated_at: Set(category.updated_at.clone()),
            ..Default::default()
        }
    }

    fn filter_condition(filter: &MovieFilter) -> Condition {
        let mut condition = Condition::all().add(categories::Column::Deleted.eq(false));

        if let Some(status) = &filter.status {
            condition = condition.add(categories::Column::Status.eq(status.clone()));
        }
        if let Some(created_by) = &filter.created_by {
            condition = condition.add(categories::Column::CreatedBy.eq(created_by.clone()));
        }
        if let Some(after) = &filter.created_after {
            condition = condition.add(categories::Column::CreatedAt.gte(after.clone()));
        }
        if let Some(before) = &filter.created_before {
            condition = condition.add(categories::Column::CreatedAt.lte(before.clone()));
        }
        if let Some(keyword) = &filter.keyword_slug {
            condition = condition.add(categories::Column::Slug.contains(keyword.clone()));
        }

        condition
    }

    pub async fn list(
        &self,
        filter: &MovieFilter,
        skip: u64,
        limit: u64,
    ) -> anyhow::Result<(Vec<Category>, u64)> {
        let condition = Self::filter_condition(filter);

        let total_records = Categories::find()
            .filter(condition.clone())
            .count(&self.conn)
            .await?;

        let rows = Categories::find()
            .filter(condition)
            .order_by_desc(categories::Column::Position)
            .offset(skip)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok((
            rows.into_iter().map(Self::map_model_to_category).collect(),
            total_records,
        ))
    }

    pub async fn list_active(&self) -> anyhow::Result<Vec<Category>> {
        let rows = Categories::find()
            .filter(categories::Column::Deleted.eq(false))
            .filter(categories::Column::Status.eq("active"))
            .order_by_desc(categories::Column::Position)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model_to_category).collect())
    }

    pub async fn get_live(&self, id: i32) -> anyhow::Result<Option<Category>> {
        let row = Categories::find_by_id(id)
            .filter(categories::Column::Deleted.eq(false))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model_to_category))
    }

    pub async fn get_row(&self, id: i32) -> anyhow::Result<Option<categories::Model>> {
        Ok(Categories::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn count_live(&self) -> anyhow::Result<u64> {
        Ok(Categories::find()
            .filter(categories::Column::Deleted.eq(false))
            .count(&self.conn)
            .await?)
    }

    pub async fn slugs_with_prefix(
        &self,
        prefix: &str,
        exclude_id: Option<i32>,
    ) -> anyhow::Result<Vec<String>> {
        let mut query = Categories::find()
            .select_only()
            .column(categories::Column::Slug)
            .filter(categories::Column::Deleted.eq(false))
            .filter(categories::Column::Slug.starts_with(prefix));

        if let Some(id) = exclude_id {
            query = query.filter(categories::Column::Id.ne(id));
        }

        Ok(query.into_tuple::<String>().all(&self.conn).await?)
    }

    pub async fn insert(&self, category: &Category) -> anyhow::Result<Category> {
        let mut active = Self::active_model_from_category(category);
        active.deleted = Set(false);

        let result = Categories::insert(active).exec(&self.conn).await?;

        let created = Categories::find_by_id(result.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("category {} vanished after insert", result.last_insert_id)
            })?;

        info!("Created category: {} ({})", created.name, created.slug);
        Ok(Self::map_model_to_category(created))
    }

    pub async fn update(&self, category: &Category) -> anyhow::Result<Category> {
        let mut active = Self::active_model_from_category(category);
        active.id = Set(category.id);
        active.created_by = sea_orm::ActiveValue::NotSet;
        active.created_at = sea_orm::ActiveValue::NotSet;

        let updated = active.update(&self.conn).await?;
        Ok(Self::map_model_to_category(updated))
    }

    pub async fn soft_delete(
        &self,
        id: i32,
        deleted_at: &str,
        deleted_by: Option<&str>,
    ) -> anyhow::Result<bool> {
        let result = Categories::update_many()
            .col_expr(
                categories::Column::Deleted,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                categories::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(deleted_at),
            )
            .col_expr(
                categories::Column::DeletedBy,
                sea_orm::sea_query::Expr::value(deleted_by),
            )
            .filter(categories::Column::Id.eq(id))
            .filter(categories::Column::Deleted.eq(false))
            .exec(&self.conn)
            .await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Soft-deleted category {}", id);
        }
        Ok(removed)
    }

    pub async fn apply_batch(
        &self,
        action: BatchAction,
        ids: &[i32],
        stamp: &str,
        actor: Option<&str>,
    ) -> anyhow::Result<u64> {
        let base = Categories::update_many()
            .filter(categories::Column::Id.is_in(ids.iter().copied()))
            .filter(categories::Column::Deleted.eq(false));

        let result = if let Some(status) = action.status() {
            base.col_expr(
                categories::Column::Status,
                sea_orm::sea_query::Expr::value(status),
            )
            .col_expr(
                categories::Column::UpdatedBy,
                sea_orm::sea_query::Expr::value(actor),
            )
            .col_expr(
                categories::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(stamp),
            )
            .exec(&self.conn)
            .await?
        } else {
            base.col_expr(
                categories::Column::Deleted,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                categories::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(stamp),
            )
            .col_expr(
                categories::Column::DeletedBy,
                sea_orm::sea_query::Expr::value(actor),
            )
            .exec(&self.conn)
            .await?
        };

        Ok(result.rows_affected)
    }
}
