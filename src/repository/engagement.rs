//! Likes, ratings and follows. Uniqueness of each pair is held by the store; inserts
//! use `ON CONFLICT DO NOTHING` so a racing duplicate is absorbed rather than raised.

use super::page_index;
use crate::models::{follow, rating, recipe_like, Follow, Rating, RatingModel, RecipeLike};
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

// ---- likes ----

/// Returns the number of rows removed (0 or 1).
pub async fn delete_like<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    recipe_id: i32,
) -> Result<u64, DbErr> {
    let res = RecipeLike::delete_many()
        .filter(recipe_like::Column::MemberId.eq(member_id))
        .filter(recipe_like::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn insert_like<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    recipe_id: i32,
) -> Result<(), DbErr> {
    let row = recipe_like::ActiveModel {
        member_id: Set(member_id),
        recipe_id: Set(recipe_id),
        liked_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    RecipeLike::insert(row)
        .on_conflict(
            OnConflict::columns([recipe_like::Column::MemberId, recipe_like::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn count_likes<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<u64, DbErr> {
    RecipeLike::find()
        .filter(recipe_like::Column::RecipeId.eq(recipe_id))
        .count(conn)
        .await
}

// ---- ratings ----

pub async fn find_rating<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    recipe_id: i32,
) -> Result<Option<RatingModel>, DbErr> {
    Rating::find()
        .filter(rating::Column::MemberId.eq(member_id))
        .filter(rating::Column::RecipeId.eq(recipe_id))
        .one(conn)
        .await
}

/// Insert or overwrite the member's score for the recipe.
pub async fn upsert_rating<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    recipe_id: i32,
    score: i32,
) -> Result<(), DbErr> {
    let row = rating::ActiveModel {
        recipe_id: Set(recipe_id),
        member_id: Set(member_id),
        score: Set(score),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    Rating::insert(row)
        .on_conflict(
            OnConflict::columns([rating::Column::RecipeId, rating::Column::MemberId])
                .update_column(rating::Column::Score)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn delete_rating<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    recipe_id: i32,
) -> Result<u64, DbErr> {
    let res = Rating::delete_many()
        .filter(rating::Column::MemberId.eq(member_id))
        .filter(rating::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn scores<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<Vec<i32>, DbErr> {
    Rating::find()
        .select_only()
        .column(rating::Column::Score)
        .filter(rating::Column::RecipeId.eq(recipe_id))
        .into_tuple::<i32>()
        .all(conn)
        .await
}

// ---- follows ----

pub async fn delete_follow<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followee_id: i32,
) -> Result<u64, DbErr> {
    let res = Follow::delete_many()
        .filter(follow::Column::FollowerId.eq(follower_id))
        .filter(follow::Column::FolloweeId.eq(followee_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn insert_follow<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followee_id: i32,
) -> Result<(), DbErr> {
    let row = follow::ActiveModel {
        follower_id: Set(follower_id),
        followee_id: Set(followee_id),
        followed_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    Follow::insert(row)
        .on_conflict(
            OnConflict::columns([follow::Column::FollowerId, follow::Column::FolloweeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Follow rows where `member_id` is the follower, newest first.
pub async fn following_page<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    page: u64,
    per_page: u64,
) -> Result<(Vec<follow::Model>, u64), DbErr> {
    follow_page(conn, follow::Column::FollowerId, member_id, page, per_page).await
}

/// Follow rows where `member_id` is the followee, newest first.
pub async fn followers_page<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    page: u64,
    per_page: u64,
) -> Result<(Vec<follow::Model>, u64), DbErr> {
    follow_page(conn, follow::Column::FolloweeId, member_id, page, per_page).await
}

async fn follow_page<C: ConnectionTrait>(
    conn: &C,
    side: follow::Column,
    member_id: i32,
    page: u64,
    per_page: u64,
) -> Result<(Vec<follow::Model>, u64), DbErr> {
    let paginator = Follow::find()
        .filter(side.eq(member_id))
        .order_by_desc(follow::Column::FollowedAt)
        .order_by_desc(follow::Column::Id)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index(page)).await?;
    Ok((items, total))
}
