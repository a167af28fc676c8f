use sea_orm_migration::prelude::*;

mod m20250301_000001_create_members_table;
mod m20250301_000002_create_recipe_tables;
mod m20250301_000003_create_engagement_tables;
mod m20250301_000004_create_moderation_tables;
mod m20250301_000005_create_recipe_summary_view;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_members_table::Migration),
            Box::new(m20250301_000002_create_recipe_tables::Migration),
            Box::new(m20250301_000003_create_engagement_tables::Migration),
            Box::new(m20250301_000004_create_moderation_tables::Migration),
            Box::new(m20250301_000005_create_recipe_summary_view::Migration),
        ]
    }
}
