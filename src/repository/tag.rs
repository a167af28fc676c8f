use crate::models::{tag, Tag, TagModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

pub async fn all<C: ConnectionTrait>(conn: &C) -> Result<Vec<TagModel>, DbErr> {
    Tag::find().order_by_asc(tag::Column::Name).all(conn).await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, name: &str) -> Result<TagModel, DbErr> {
    tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// The subset of `ids` that name existing tags, deduplicated.
pub async fn existing_ids<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> Result<Vec<i32>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Tag::find()
        .select_only()
        .column(tag::Column::Id)
        .filter(tag::Column::Id.is_in(ids.to_vec()))
        .order_by_asc(tag::Column::Id)
        .into_tuple::<i32>()
        .all(conn)
        .await
}
