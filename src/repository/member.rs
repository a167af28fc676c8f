use crate::models::{member, recipe, recipe_like, Member, MemberModel, Recipe, RecipeLike};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set,
};
use std::collections::HashMap;

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<MemberModel>, DbErr> {
    Member::find_by_id(id).one(conn).await
}

pub async fn find_by_login_id<C: ConnectionTrait>(
    conn: &C,
    login_id: &str,
) -> Result<Option<MemberModel>, DbErr> {
    Member::find()
        .filter(member::Column::LoginId.eq(login_id))
        .one(conn)
        .await
}

/// Members keyed by id; unknown ids are simply absent.
pub async fn find_many<C: ConnectionTrait>(
    conn: &C,
    ids: &[i32],
) -> Result<HashMap<i32, MemberModel>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let members = Member::find()
        .filter(member::Column::Id.is_in(ids.to_vec()))
        .all(conn)
        .await?;
    Ok(members.into_iter().map(|m| (m.id, m)).collect())
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    login_id: &str,
    password_hash: String,
    name: &str,
) -> Result<MemberModel, DbErr> {
    member::ActiveModel {
        login_id: Set(login_id.to_string()),
        password_hash: Set(password_hash),
        name: Set(name.to_string()),
        role: Set(member::MemberRole::Gourmet),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn count_recipes<C: ConnectionTrait>(conn: &C, member_id: i32) -> Result<u64, DbErr> {
    Recipe::find()
        .filter(recipe::Column::AuthorId.eq(member_id))
        .count(conn)
        .await
}

/// Likes on recipes the member authored.
pub async fn count_likes_received<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
) -> Result<u64, DbErr> {
    RecipeLike::find()
        .join(JoinType::InnerJoin, recipe_like::Relation::Recipe.def())
        .filter(recipe::Column::AuthorId.eq(member_id))
        .count(conn)
        .await
}
