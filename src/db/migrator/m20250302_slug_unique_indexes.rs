use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Slug uniqueness is enforced among non-deleted rows only, so a soft-deleted
/// movie never blocks reuse of its slug. The write pipeline retries with the
/// next suffix when an insert or rename trips one of these indexes.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_movies_slug_live ON movies(slug) WHERE deleted = 0",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_slug_live ON categories(slug) WHERE deleted = 0",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_movies_created_at ON movies(created_at)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_movies_created_at")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_categories_slug_live")
            .await?;
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_movies_slug_live")
            .await?;

        Ok(())
    }
}
