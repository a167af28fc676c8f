use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Recipes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum RecipeComments {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    ReporterId,
    TargetType,
    RecipeId,
    CommentId,
    Reason,
    Status,
    CreatedAt,
    HandledBy,
    HandledAt,
    HandleNote,
}

#[derive(DeriveIden)]
enum UserSanctions {
    Table,
    Id,
    MemberId,
    Sanction,
    Reason,
    StartAt,
    EndAt,
    CreatedBy,
    CreatedAt,
}

// 同一举报人对同一目标只能有一条待处理举报，目标已删除的举报不参与约束
const PENDING_REPORT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_reports_pending_target \
    ON reports (reporter_id, target_type, (COALESCE(recipe_id, 0)), (COALESCE(comment_id, 0))) \
    WHERE status = 'PENDING' AND COALESCE(recipe_id, comment_id) IS NOT NULL";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::ReporterId).integer().not_null())
                    .col(ColumnDef::new(Reports::TargetType).string_len(20).not_null())
                    .col(ColumnDef::new(Reports::RecipeId).integer().null())
                    .col(ColumnDef::new(Reports::CommentId).integer().null())
                    .col(ColumnDef::new(Reports::Reason).text().not_null())
                    .col(
                        ColumnDef::new(Reports::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Reports::HandledBy).integer().null())
                    .col(ColumnDef::new(Reports::HandledAt).timestamp().null())
                    .col(ColumnDef::new(Reports::HandleNote).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_reporter_id")
                            .from(Reports::Table, Reports::ReporterId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_recipe_id")
                            .from(Reports::Table, Reports::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_comment_id")
                            .from(Reports::Table, Reports::CommentId)
                            .to(RecipeComments::Table, RecipeComments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_handled_by")
                            .from(Reports::Table, Reports::HandledBy)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_status_created_at")
                    .table(Reports::Table)
                    .col(Reports::Status)
                    .col(Reports::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(PENDING_REPORT_INDEX)
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSanctions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSanctions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserSanctions::MemberId).integer().not_null())
                    .col(
                        ColumnDef::new(UserSanctions::Sanction)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserSanctions::Reason).text().not_null())
                    .col(
                        ColumnDef::new(UserSanctions::StartAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(UserSanctions::EndAt).timestamp().null())
                    .col(ColumnDef::new(UserSanctions::CreatedBy).integer().null())
                    .col(
                        ColumnDef::new(UserSanctions::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_sanctions_member_id")
                            .from(UserSanctions::Table, UserSanctions::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_sanctions_created_by")
                            .from(UserSanctions::Table, UserSanctions::CreatedBy)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_sanctions_member_id")
                    .table(UserSanctions::Table)
                    .col(UserSanctions::MemberId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSanctions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).if_exists().to_owned())
            .await
    }
}
