use super::page_index;
use crate::models::{
    ingredient, recipe, recipe_ingredient, recipe_step, recipe_summary, recipe_tag, tag,
    Ingredient, IngredientModel, Recipe, RecipeIngredient, RecipeIngredientModel, RecipeModel,
    RecipeStep, RecipeStepModel, RecipeSummary, RecipeSummaryModel, RecipeTag, Tag, TagModel,
};
use sea_orm::{
    sea_query::{Expr, Func, OnConflict, SimpleExpr},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;

#[derive(Debug)]
pub struct NewStep {
    pub step_order: i32,
    pub content: String,
}

#[derive(Debug)]
pub struct NewIngredient {
    pub name: String,
    pub amount: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<RecipeModel>, DbErr> {
    Recipe::find_by_id(id).one(conn).await
}

/// Row-locks the recipe for the rest of the transaction. SQLite ignores the lock clause.
pub async fn lock_for_update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<RecipeModel>, DbErr> {
    Recipe::find_by_id(id).lock_exclusive().one(conn).await
}

/// Newest first.
pub async fn page<C: ConnectionTrait>(
    conn: &C,
    page: u64,
    per_page: u64,
) -> Result<(Vec<RecipeModel>, u64), DbErr> {
    let paginator = Recipe::find()
        .order_by_desc(recipe::Column::CreatedAt)
        .order_by_desc(recipe::Column::Id)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index(page)).await?;
    Ok((items, total))
}

/// Likes, then average score (unrated ranks as 0), rating count, comment count, newest id.
pub async fn popular_page<C: ConnectionTrait>(
    conn: &C,
    page: u64,
    per_page: u64,
) -> Result<(Vec<RecipeSummaryModel>, u64), DbErr> {
    let paginator = RecipeSummary::find()
        .order_by_desc(recipe_summary::Column::LikeCount)
        .order_by_desc(SimpleExpr::from(Func::coalesce([
            Expr::col(recipe_summary::Column::AvgScore).into(),
            Expr::val(0.0).into(),
        ])))
        .order_by_desc(recipe_summary::Column::RatingCount)
        .order_by_desc(recipe_summary::Column::CommentCount)
        .order_by_desc(recipe_summary::Column::RecipeId)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index(page)).await?;
    Ok((items, total))
}

pub async fn steps<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
) -> Result<Vec<RecipeStepModel>, DbErr> {
    RecipeStep::find()
        .filter(recipe_step::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_step::Column::StepOrder)
        .all(conn)
        .await
}

pub async fn ingredients<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
) -> Result<Vec<(RecipeIngredientModel, Option<IngredientModel>)>, DbErr> {
    RecipeIngredient::find()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_ingredient::Column::Id)
        .find_also_related(Ingredient)
        .all(conn)
        .await
}

/// Tags of each recipe in `recipe_ids`, ordered by tag name.
pub async fn tags_by_recipe<C: ConnectionTrait>(
    conn: &C,
    recipe_ids: &[i32],
) -> Result<HashMap<i32, Vec<TagModel>>, DbErr> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let links = RecipeTag::find()
        .filter(recipe_tag::Column::RecipeId.is_in(recipe_ids.to_vec()))
        .all(conn)
        .await?;
    let tag_ids: Vec<i32> = links.iter().map(|l| l.tag_id).collect();
    if tag_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let tags: HashMap<i32, TagModel> = Tag::find()
        .filter(tag::Column::Id.is_in(tag_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let mut grouped: HashMap<i32, Vec<TagModel>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags.get(&link.tag_id) {
            grouped.entry(link.recipe_id).or_default().push(tag.clone());
        }
    }
    for list in grouped.values_mut() {
        list.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Ok(grouped)
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    model: recipe::ActiveModel,
) -> Result<RecipeModel, DbErr> {
    model.insert(conn).await
}

pub async fn insert_steps<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    steps: Vec<NewStep>,
) -> Result<(), DbErr> {
    if steps.is_empty() {
        return Ok(());
    }
    let rows = steps.into_iter().map(|s| recipe_step::ActiveModel {
        recipe_id: Set(recipe_id),
        step_order: Set(s.step_order),
        content: Set(s.content),
        ..Default::default()
    });
    RecipeStep::insert_many(rows).exec_without_returning(conn).await?;
    Ok(())
}

pub async fn clear_steps<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<(), DbErr> {
    RecipeStep::delete_many()
        .filter(recipe_step::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Get-or-create by unique name. A concurrent insert of the same name lands on the
/// same row.
pub async fn get_or_create_ingredient<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<IngredientModel, DbErr> {
    let row = ingredient::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    Ingredient::insert(row)
        .on_conflict(
            OnConflict::column(ingredient::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ingredient::find()
        .filter(ingredient::Column::Name.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("ingredient '{name}'")))
}

pub async fn link_ingredients<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    items: Vec<NewIngredient>,
) -> Result<(), DbErr> {
    for item in items {
        let ingredient = get_or_create_ingredient(conn, &item.name).await?;
        RecipeIngredient::insert(recipe_ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(ingredient.id),
            amount: Set(item.amount),
            ..Default::default()
        })
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

pub async fn clear_ingredients<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<(), DbErr> {
    RecipeIngredient::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Link only the ids that name an existing tag; the rest are dropped silently.
pub async fn link_tags<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
) -> Result<(), DbErr> {
    let existing = super::tag::existing_ids(conn, tag_ids).await?;
    if existing.is_empty() {
        return Ok(());
    }
    let rows = existing.into_iter().map(|tag_id| recipe_tag::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(tag_id),
        ..Default::default()
    });
    RecipeTag::insert_many(rows).exec_without_returning(conn).await?;
    Ok(())
}

pub async fn clear_tags<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<(), DbErr> {
    RecipeTag::delete_many()
        .filter(recipe_tag::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn set_rating_aggregate<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    avg_score: Option<f64>,
    rating_count: i32,
) -> Result<(), DbErr> {
    Recipe::update_many()
        .col_expr(recipe::Column::AvgScore, Expr::value(avg_score))
        .col_expr(recipe::Column::RatingCount, Expr::value(rating_count))
        .filter(recipe::Column::Id.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Steps, ingredient links, tag links, likes, ratings and comments go with it.
pub async fn delete<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<u64, DbErr> {
    let res = Recipe::delete_by_id(recipe_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn set_image_path<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    path: &str,
) -> Result<(), DbErr> {
    Recipe::update_many()
        .col_expr(recipe::Column::ImagePath, Expr::value(path))
        .col_expr(
            recipe::Column::UpdatedAt,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(recipe::Column::Id.eq(recipe_id))
        .exec(conn)
        .await?;
    Ok(())
}
