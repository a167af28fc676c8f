use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const VIEW_BODY: &str = "AS
SELECT
    r.id AS recipe_id,
    r.title AS title,
    r.description AS description,
    r.cooking_time AS cooking_time,
    r.avg_score AS avg_score,
    r.rating_count AS rating_count,
    (SELECT COUNT(*) FROM recipe_likes l WHERE l.recipe_id = r.id) AS like_count,
    (SELECT COUNT(*) FROM recipe_comments c WHERE c.recipe_id = r.id) AS comment_count
FROM recipes r";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let create = match manager.get_database_backend() {
            DatabaseBackend::Sqlite => "CREATE VIEW IF NOT EXISTS v_recipe_summary",
            _ => "CREATE OR REPLACE VIEW v_recipe_summary",
        };
        manager
            .get_connection()
            .execute_unprepared(&format!("{create} {VIEW_BODY}"))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP VIEW IF EXISTS v_recipe_summary")
            .await?;
        Ok(())
    }
}
