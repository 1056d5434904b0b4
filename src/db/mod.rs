use crate::models::movie::{Movie, MovieFilter};
use crate::models::{BatchAction, Category, Cinema};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use crate::entities::categories::Model as CategoryRow;
pub use crate::entities::movies::Model as MovieRow;
pub use repositories::movie::is_unique_violation;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn cinema_repo(&self) -> repositories::cinema::CinemaRepository {
        repositories::cinema::CinemaRepository::new(self.conn.clone())
    }

    // Movies

    pub async fn list_movies(
        &self,
        filter: &MovieFilter,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<Movie>, u64)> {
        self.movie_repo().list(filter, skip, limit).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get_live(id).await
    }

    pub async fn get_movie_row(&self, id: i32) -> Result<Option<MovieRow>> {
        self.movie_repo().get_row(id).await
    }

    pub async fn get_movie_with_category(
        &self,
        id: i32,
    ) -> Result<Option<(Movie, Option<Category>)>> {
        self.movie_repo().get_live_with_category(id).await
    }

    pub async fn list_client_movies(
        &self,
        category_id: Option<i32>,
        keyword: Option<&str>,
    ) -> Result<Vec<(Movie, Option<Category>)>> {
        self.movie_repo().list_client(category_id, keyword).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count_live().await
    }

    pub async fn movie_slugs_with_prefix(
        &self,
        prefix: &str,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>> {
        self.movie_repo().slugs_with_prefix(prefix, exclude_id).await
    }

    pub async fn insert_movie(&self, movie: &Movie) -> Result<Movie> {
        self.movie_repo().insert(movie).await
    }

    pub async fn update_movie(&self, movie: &Movie) -> Result<Movie> {
        self.movie_repo().update(movie).await
    }

    pub async fn soft_delete_movie(
        &self,
        id: i32,
        deleted_at: &str,
        deleted_by: Option<&str>,
    ) -> Result<bool> {
        self.movie_repo().soft_delete(id, deleted_at, deleted_by).await
    }

    pub async fn apply_movie_batch(
        &self,
        action: BatchAction,
        ids: &[i32],
        stamp: &str,
        actor: Option<&str>,
    ) -> Result<u64> {
        self.movie_repo().apply_batch(action, ids, stamp, actor).await
    }

    // Categories

    pub async fn list_categories(
        &self,
        filter: &MovieFilter,
        skip: u64,
        limit: u64,
    ) -> Result<(Vec<Category>, u64)> {
        self.category_repo().list(filter, skip, limit).await
    }

    pub async fn list_active_categories(&self) -> Result<Vec<Category>> {
        self.category_repo().list_active().await
    }

    pub async fn get_category(&self, id: i32) -> Result<Option<Category>> {
        self.category_repo().get_live(id).await
    }

    pub async fn get_category_row(&self, id: i32) -> Result<Option<CategoryRow>> {
        self.category_repo().get_row(id).await
    }

    pub async fn count_categories(&self) -> Result<u64> {
        self.category_repo().count_live().await
    }

    pub async fn category_slugs_with_prefix(
        &self,
        prefix: &str,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>> {
        self.category_repo()
            .slugs_with_prefix(prefix, exclude_id)
            .await
    }

    pub async fn insert_category(&self, category: &Category) -> Result<Category> {
        self.category_repo().insert(category).await
    }

    pub async fn update_category(&self, category: &Category) -> Result<Category> {
        self.category_repo().update(category).await
    }

    pub async fn soft_delete_category(
        &self,
        id: i32,
        deleted_at: &str,
        deleted_by: Option<&str>,
    ) -> Result<bool> {
        self.category_repo()
            .soft_delete(id, deleted_at, deleted_by)
            .await
    }

    pub async fn apply_category_batch(
        &self,
        action: BatchAction,
        ids: &[i32],
        stamp: &str,
        actor: Option<&str>,
    ) -> Result<u64> {
        self.category_repo()
            .apply_batch(action, ids, stamp, actor)
            .await
    }

    // Cinemas

    pub async fn list_active_cinemas(&self) -> Result<Vec<Cinema>> {
        self.cinema_repo().list_active().await
    }

    pub async fn count_cinemas(&self) -> Result<u64> {
        self.cinema_repo().count().await
    }

    pub async fn insert_cinema(&self, cinema: &Cinema) -> Result<i32> {
        self.cinema_repo().insert(cinema).await
    }

    pub async fn clear_cinemas(&self) -> Result<u64> {
        self.cinema_repo().clear().await
    }
}
