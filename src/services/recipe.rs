use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::{
        recipe, IngredientModel, MemberModel, RecipeIngredientModel, RecipeModel,
        RecipeStepModel, RecipeSummaryModel, TagModel,
    },
    policy,
    repository::{
        self,
        recipe::{NewIngredient, NewStep},
    },
    storage::BlobStore,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use std::collections::HashSet;

const IMAGE_NAMESPACE: &str = "recipes";

/// Everything needed to create a recipe in one go.
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub cooking_time: Option<i32>,
    pub ingredients: Vec<NewIngredient>,
    pub steps: Vec<NewStep>,
    pub tag_ids: Vec<i32>,
}

/// Partial update. `None` leaves a field untouched; `Some` of a list replaces it wholesale,
/// so `tag_ids: Some(vec![])` clears the tags.
#[derive(Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub ingredients: Option<Vec<NewIngredient>>,
    pub steps: Option<Vec<NewStep>>,
    pub tag_ids: Option<Vec<i32>>,
}

/// A recipe with all its children loaded.
pub struct RecipeAggregate {
    pub recipe: RecipeModel,
    pub author: MemberModel,
    pub steps: Vec<RecipeStepModel>,
    pub ingredients: Vec<(RecipeIngredientModel, IngredientModel)>,
    pub tags: Vec<TagModel>,
}

/// Listing row: the recipe, its author and its tags.
pub struct RecipeCard {
    pub recipe: RecipeModel,
    pub author: MemberModel,
    pub tags: Vec<TagModel>,
}

pub struct RecipeService {
    db: DatabaseConnection,
}

impl RecipeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the recipe, its ingredient links, steps and tag links atomically.
    pub async fn create(
        &self,
        principal: &Principal,
        draft: RecipeDraft,
    ) -> AppResult<RecipeAggregate> {
        let title = required_text("title", &draft.title)?;
        let ingredients = normalize_ingredients(draft.ingredients)?;
        let steps = normalize_steps(draft.steps)?;

        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().naive_utc();
        let recipe = repository::recipe::insert(
            &txn,
            recipe::ActiveModel {
                author_id: Set(principal.member_id),
                title: Set(title),
                description: Set(draft.description),
                cooking_time: Set(draft.cooking_time),
                image_path: Set(None),
                avg_score: Set(None),
                rating_count: Set(0),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            },
        )
        .await?;

        repository::recipe::link_ingredients(&txn, recipe.id, ingredients).await?;
        repository::recipe::insert_steps(&txn, recipe.id, steps).await?;
        repository::recipe::link_tags(&txn, recipe.id, &draft.tag_ids).await?;

        txn.commit().await?;

        tracing::info!(recipe_id = recipe.id, member_id = principal.member_id, "recipe created");
        self.detail(recipe.id).await
    }

    /// Owner or admin only.
    pub async fn update(
        &self,
        principal: &Principal,
        recipe_id: i32,
        patch: RecipePatch,
    ) -> AppResult<RecipeAggregate> {
        let title = patch
            .title
            .as_deref()
            .map(|t| required_text("title", t))
            .transpose()?;
        let ingredients = patch.ingredients.map(normalize_ingredients).transpose()?;
        let steps = patch.steps.map(normalize_steps).transpose()?;

        let txn = self.db.begin().await?;

        let existing = repository::recipe::lock_for_update(&txn, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;
        policy::ensure_can_modify(principal, existing.author_id)?;

        let mut active: recipe::ActiveModel = existing.into_active_model();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(cooking_time) = patch.cooking_time {
            active.cooking_time = Set(Some(cooking_time));
        }
        active.updated_at = Set(chrono::Utc::now().naive_utc());
        active.update(&txn).await?;

        if let Some(ingredients) = ingredients {
            repository::recipe::clear_ingredients(&txn, recipe_id).await?;
            repository::recipe::link_ingredients(&txn, recipe_id, ingredients).await?;
        }
        if let Some(steps) = steps {
            repository::recipe::clear_steps(&txn, recipe_id).await?;
            repository::recipe::insert_steps(&txn, recipe_id, steps).await?;
        }
        if let Some(tag_ids) = patch.tag_ids {
            repository::recipe::clear_tags(&txn, recipe_id).await?;
            repository::recipe::link_tags(&txn, recipe_id, &tag_ids).await?;
        }

        txn.commit().await?;
        self.detail(recipe_id).await
    }

    /// Owner or admin only. Children go with the recipe.
    pub async fn delete(&self, principal: &Principal, recipe_id: i32) -> AppResult<()> {
        let existing = repository::recipe::find_by_id(&self.db, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;
        policy::ensure_can_modify(principal, existing.author_id)?;

        repository::recipe::delete(&self.db, recipe_id).await?;
        tracing::info!(recipe_id, member_id = principal.member_id, "recipe deleted");
        Ok(())
    }

    pub async fn detail(&self, recipe_id: i32) -> AppResult<RecipeAggregate> {
        let recipe = repository::recipe::find_by_id(&self.db, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let author = repository::member::find_by_id(&self.db, recipe.author_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let steps = repository::recipe::steps(&self.db, recipe_id).await?;
        let ingredients = repository::recipe::ingredients(&self.db, recipe_id)
            .await?
            .into_iter()
            .filter_map(|(link, ingredient)| ingredient.map(|i| (link, i)))
            .collect();
        let tags = repository::recipe::tags_by_recipe(&self.db, &[recipe_id])
            .await?
            .remove(&recipe_id)
            .unwrap_or_default();

        Ok(RecipeAggregate {
            recipe,
            author,
            steps,
            ingredients,
            tags,
        })
    }

    /// Newest first.
    pub async fn list(&self, page: u64, per_page: u64) -> AppResult<(Vec<RecipeCard>, u64)> {
        let (recipes, total) = repository::recipe::page(&self.db, page, per_page).await?;

        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();
        let authors = repository::member::find_many(&self.db, &author_ids).await?;
        let mut tags = repository::recipe::tags_by_recipe(&self.db, &recipe_ids).await?;

        let cards = recipes
            .into_iter()
            .filter_map(|recipe| {
                let author = authors.get(&recipe.author_id)?.clone();
                let tags = tags.remove(&recipe.id).unwrap_or_default();
                Some(RecipeCard {
                    recipe,
                    author,
                    tags,
                })
            })
            .collect();
        Ok((cards, total))
    }

    pub async fn popular(
        &self,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<RecipeSummaryModel>, u64)> {
        Ok(repository::recipe::popular_page(&self.db, page, per_page).await?)
    }

    /// Store the image through `blobs` and record its path. Owner or admin only.
    pub async fn set_image(
        &self,
        principal: &Principal,
        recipe_id: i32,
        blobs: &dyn BlobStore,
        original_name: &str,
        data: &[u8],
    ) -> AppResult<String> {
        let existing = repository::recipe::find_by_id(&self.db, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;
        policy::ensure_can_modify(principal, existing.author_id)?;

        let path = blobs.put(IMAGE_NAMESPACE, original_name, data).await?;
        if let Err(e) = repository::recipe::set_image_path(&self.db, recipe_id, &path).await {
            discard_blob(blobs, &path).await;
            return Err(e.into());
        }

        if let Some(previous) = existing.image_path.as_deref().filter(|p| *p != path) {
            discard_blob(blobs, previous).await;
        }

        tracing::debug!(recipe_id, path = %path, "recipe image stored");
        Ok(path)
    }
}

/// Best-effort removal; a leftover file is logged, never surfaced to the caller.
async fn discard_blob(blobs: &dyn BlobStore, path: &str) {
    if let Err(e) = blobs.delete(path).await {
        tracing::warn!(path, error = %e, "failed to remove stored image");
    }
}

fn required_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim names and amounts; names must be non-blank and distinct within one recipe.
fn normalize_ingredients(items: Vec<NewIngredient>) -> AppResult<Vec<NewIngredient>> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| {
            let name = required_text("ingredient name", &item.name)?;
            if !seen.insert(name.clone()) {
                return Err(AppError::Validation(format!(
                    "ingredient '{}' listed more than once",
                    name
                )));
            }
            let amount = item
                .amount
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty());
            Ok(NewIngredient { name, amount })
        })
        .collect()
}

/// Step orders are caller-chosen but must be positive and unique within the recipe.
fn normalize_steps(steps: Vec<NewStep>) -> AppResult<Vec<NewStep>> {
    let mut seen = HashSet::new();
    steps
        .into_iter()
        .map(|step| {
            if step.step_order < 1 {
                return Err(AppError::validation("step_order must be at least 1"));
            }
            if !seen.insert(step.step_order) {
                return Err(AppError::Validation(format!(
                    "step_order {} used more than once",
                    step.step_order
                )));
            }
            let content = required_text("step content", &step.content)?;
            Ok(NewStep {
                step_order: step.step_order,
                content,
            })
        })
        .collect()
}
