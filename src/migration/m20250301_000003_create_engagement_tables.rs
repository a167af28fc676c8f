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
enum RecipeLikes {
    Table,
    Id,
    MemberId,
    RecipeId,
    LikedAt,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    RecipeId,
    MemberId,
    Score,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Follows {
    Table,
    Id,
    FollowerId,
    FolloweeId,
    FollowedAt,
}

#[derive(DeriveIden)]
enum RecipeComments {
    Table,
    Id,
    RecipeId,
    AuthorId,
    ParentCommentId,
    Content,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 点赞
        manager
            .create_table(
                Table::create()
                    .table(RecipeLikes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeLikes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecipeLikes::MemberId).integer().not_null())
                    .col(ColumnDef::new(RecipeLikes::RecipeId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeLikes::LikedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_likes_member_id")
                            .from(RecipeLikes::Table, RecipeLikes::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_likes_recipe_id")
                            .from(RecipeLikes::Table, RecipeLikes::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_likes_member_recipe")
                    .table(RecipeLikes::Table)
                    .col(RecipeLikes::MemberId)
                    .col(RecipeLikes::RecipeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // 评分
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::RecipeId).integer().not_null())
                    .col(ColumnDef::new(Ratings::MemberId).integer().not_null())
                    .col(
                        ColumnDef::new(Ratings::Score)
                            .integer()
                            .not_null()
                            .check(Expr::col(Ratings::Score).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(Ratings::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_recipe_id")
                            .from(Ratings::Table, Ratings::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_member_id")
                            .from(Ratings::Table, Ratings::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_recipe_member")
                    .table(Ratings::Table)
                    .col(Ratings::RecipeId)
                    .col(Ratings::MemberId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // 关注
        manager
            .create_table(
                Table::create()
                    .table(Follows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Follows::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Follows::FollowerId).integer().not_null())
                    .col(ColumnDef::new(Follows::FolloweeId).integer().not_null())
                    .col(
                        ColumnDef::new(Follows::FollowedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Follows::FollowerId).ne(Expr::col(Follows::FolloweeId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follows_follower_id")
                            .from(Follows::Table, Follows::FollowerId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follows_followee_id")
                            .from(Follows::Table, Follows::FolloweeId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_follows_pair")
                    .table(Follows::Table)
                    .col(Follows::FollowerId)
                    .col(Follows::FolloweeId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // 评论，回复随父评论一起删除
        manager
            .create_table(
                Table::create()
                    .table(RecipeComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipeComments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecipeComments::RecipeId).integer().not_null())
                    .col(ColumnDef::new(RecipeComments::AuthorId).integer().not_null())
                    .col(
                        ColumnDef::new(RecipeComments::ParentCommentId)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(RecipeComments::Content).text().not_null())
                    .col(
                        ColumnDef::new(RecipeComments::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_comments_recipe_id")
                            .from(RecipeComments::Table, RecipeComments::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_comments_author_id")
                            .from(RecipeComments::Table, RecipeComments::AuthorId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recipe_comments_parent_id")
                            .from(RecipeComments::Table, RecipeComments::ParentCommentId)
                            .to(RecipeComments::Table, RecipeComments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_comments_recipe_id")
                    .table(RecipeComments::Table)
                    .col(RecipeComments::RecipeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipeComments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Follows::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ratings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecipeLikes::Table).if_exists().to_owned())
            .await
    }
}
