//! Category management: the same filter/pagination/slug machinery as movies,
//! over a much smaller aggregate.

use crate::catalog::Page;
use crate::catalog::dates;
use crate::catalog::slug::{slugify, with_suffix};
use crate::db::{Store, is_unique_violation};
use crate::models::category::{Category, CategoryDraft, CategoryNode, CategoryPatch};
use crate::models::movie::MovieFilter;
use crate::models::{BatchAction, build_category_tree};
use crate::services::movie_service::CatalogError;
use std::collections::HashSet;

const SLUG_RETRY_LIMIT: u32 = 5;

pub struct CategoryService {
    store: Store,
}

impl CategoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn next_free_slug(
        &self,
        base: &str,
        exclude_id: Option<i32>,
    ) -> Result<String, CatalogError> {
        let taken: HashSet<String> = self
            .store
            .category_slugs_with_prefix(base, exclude_id)
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
            "category".to_string()
        } else {
            base
        }
    }

    pub async fn list(
        &self,
        filter: MovieFilter,
        page: Page,
    ) -> Result<(Vec<Category>, u64), CatalogError> {
        self.store
            .list_categories(&filter, page.skip(), page.limit)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    /// Active categories nested by `parent_id`, for the client navigation.
    pub async fn tree(&self) -> Result<Vec<CategoryNode>, CatalogError> {
        let categories = self
            .store
            .list_active_categories()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(build_category_tree(categories))
    }

    pub async fn create(
        &self,
        draft: CategoryDraft,
        actor: Option<String>,
    ) -> Result<Category, CatalogError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }

        let position = match draft.position {
            Some(position) => position,
            None => {
                let total = self
                    .store
                    .count_categories()
                    .await
                    .map_err(|e| CatalogError::Database(e.to_string()))?;
                i32::try_from(total).unwrap_or(i32::MAX - 1) + 1
            }
        };

        let now = dates::now_rfc3339();
        let mut category = Category {
            id: 0,
            name: name.clone(),
            slug: String::new(),
            parent_id: draft.parent_id,
            avatar: draft.avatar,
            position,
            status: draft.status.unwrap_or_else(|| "active".to_string()),
            created_by: actor.clone(),
            updated_by: actor,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };

        let base = Self::base_slug(&name);
        for attempt in 0..SLUG_RETRY_LIMIT {
            category.slug = self.next_free_slug(&base, None).await?;

            match self.store.insert_category(&category).await {
                Ok(created) => return Ok(created),
                Err(e) if is_unique_violation(&e) && attempt + 1 < SLUG_RETRY_LIMIT => {
                    tracing::debug!("Slug {} taken concurrently, retrying", category.slug);
                }
                Err(e) => return Err(CatalogError::Database(e.to_string())),
            }
        }

        Err(CatalogError::Database(format!(
            "Could not allocate a unique slug for '{base}'"
        )))
    }

    pub async fn update(
        &self,
        id: i32,
        patch: CategoryPatch,
        actor: Option<String>,
    ) -> Result<Category, CatalogError> {
        let mut category = self
            .store
            .get_category(id)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::NotFound("Category", id))?;

        let mut rename_base = None;
        if let Some(name) = &patch.name {
            let trimmed = name.trim();
            if !trimmed.is_empty() && trimmed != category.name {
                category.name = trimmed.to_string();
                rename_base = Some(Self::base_slug(trimmed));
            }
        }

        if let Some(parent_id) = patch.parent_id {
            category.parent_id = Some(parent_id);
        }
        if let Some(avatar) = patch.avatar {
            category.avatar = Some(avatar);
        }
        if let Some(position) = patch.position {
            category.position = position;
        }
        if let Some(status) = patch.status {
            category.status = status;
        }

        category.updated_by = actor;
        category.updated_at = Some(dates::now_rfc3339());

        if let Some(base) = rename_base {
            for attempt in 0..SLUG_RETRY_LIMIT {
                category.slug = self.next_free_slug(&base, Some(id)).await?;

                match self.store.update_category(&category).await {
                    Ok(updated) => return Ok(updated),
                    Err(e) if is_unique_violation(&e) && attempt + 1 < SLUG_RETRY_LIMIT => {
                        tracing::debug!("Slug {} taken concurrently, retrying", category.slug);
                    }
                    Err(e) => return Err(CatalogError::Database(e.to_string())),
                }
            }

            return Err(CatalogError::Database(format!(
                "Could not allocate a unique slug for '{}'",
                category.name
            )));
        }

        self.store
            .update_category(&category)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    pub async fn delete(&self, id: i32, actor: Option<String>) -> Result<(), CatalogError> {
        let removed = self
            .store
            .soft_delete_category(id, &dates::now_rfc3339(), actor.as_deref())
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if removed {
            Ok(())
        } else {
            Err(CatalogError::NotFound("Category", id))
        }
    }

    pub async fn change_multi(
        &self,
        action: BatchAction,
        ids: &[i32],
        actor: Option<String>,
    ) -> Result<u64, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::Validation("No ids provided".to_string()));
        }

        self.store
            .apply_category_batch(action, ids, &dates::now_rfc3339(), actor.as_deref())
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))
    }
}
