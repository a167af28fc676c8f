use super::page_index;
use crate::models::{recipe_comment, RecipeComment, RecipeCommentModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<RecipeCommentModel>, DbErr> {
    RecipeComment::find_by_id(id).one(conn).await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    author_id: i32,
    parent_comment_id: Option<i32>,
    content: String,
) -> Result<RecipeCommentModel, DbErr> {
    recipe_comment::ActiveModel {
        recipe_id: Set(recipe_id),
        author_id: Set(author_id),
        parent_comment_id: Set(parent_comment_id),
        content: Set(content),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Oldest first, so replies follow the comments they answer.
pub async fn page_for_recipe<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    page: u64,
    per_page: u64,
) -> Result<(Vec<RecipeCommentModel>, u64), DbErr> {
    let paginator = RecipeComment::find()
        .filter(recipe_comment::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_comment::Column::CreatedAt)
        .order_by_asc(recipe_comment::Column::Id)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index(page)).await?;
    Ok((items, total))
}

/// Replies to the comment are removed with it.
pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    let res = RecipeComment::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
