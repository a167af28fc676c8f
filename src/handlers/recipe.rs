use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::handlers::auth::MemberSummary;
use crate::handlers::tag::TagResponse;
use crate::middleware::auth::Principal;
use crate::models::RecipeSummaryModel;
use crate::repository::recipe::{NewIngredient, NewStep};
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::recipe::{
    RecipeAggregate, RecipeCard, RecipeDraft, RecipePatch, RecipeService,
};
use crate::storage::SharedBlobStore;
use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngredientInput {
    /// Ingredient name; reused across recipes
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Free-text amount, e.g. "1tsp"
    #[validate(length(max = 50))]
    pub amount: Option<String>,
}

impl From<IngredientInput> for NewIngredient {
    fn from(i: IngredientInput) -> Self {
        Self {
            name: i.name,
            amount: i.amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StepInput {
    /// Position of the step, unique within the recipe
    #[validate(range(min = 1))]
    pub step_order: i32,
    #[validate(length(min = 1))]
    pub content: String,
}

impl From<StepInput> for NewStep {
    fn from(s: StepInput) -> Self {
        Self {
            step_order: s.step_order,
            content: s.content,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRecipeRequest {
    /// Recipe title (1-150 characters)
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minutes
    #[validate(range(min = 0))]
    pub cooking_time: Option<i32>,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    #[validate(nested)]
    pub steps: Vec<StepInput>,
    /// Ids that do not name an existing tag are ignored
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// Omitted fields are left as they are. A supplied list replaces the stored one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub cooking_time: Option<i32>,
    #[validate(nested)]
    pub ingredients: Option<Vec<IngredientInput>>,
    #[validate(nested)]
    pub steps: Option<Vec<StepInput>>,
    /// `[]` removes every tag
    pub tag_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeListItem {
    pub recipe_id: i32,
    pub title: String,
    pub author: MemberSummary,
    pub avg_score: Option<f64>,
    pub rating_count: i32,
    pub image_path: Option<String>,
    pub created_at: String,
    pub tags: Vec<TagResponse>,
}

impl From<RecipeCard> for RecipeListItem {
    fn from(card: RecipeCard) -> Self {
        Self {
            recipe_id: card.recipe.id,
            title: card.recipe.title,
            author: card.author.into(),
            avg_score: card.recipe.avg_score,
            rating_count: card.recipe.rating_count,
            image_path: card.recipe.image_path,
            created_at: card.recipe.created_at.to_string(),
            tags: card.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StepResponse {
    pub step_order: i32,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngredientLine {
    pub ingredient_id: i32,
    pub name: String,
    pub amount: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    pub recipe_id: i32,
    pub title: String,
    pub description: String,
    pub cooking_time: Option<i32>,
    pub image_path: Option<String>,
    pub author: MemberSummary,
    /// Mean score rounded to two places; null while unrated
    pub avg_score: Option<f64>,
    pub rating_count: i32,
    pub created_at: String,
    pub updated_at: String,
    /// Ordered by step_order
    pub steps: Vec<StepResponse>,
    pub ingredients: Vec<IngredientLine>,
    pub tags: Vec<TagResponse>,
}

impl From<RecipeAggregate> for RecipeDetailResponse {
    fn from(agg: RecipeAggregate) -> Self {
        let r = agg.recipe;
        Self {
            recipe_id: r.id,
            title: r.title,
            description: r.description,
            cooking_time: r.cooking_time,
            image_path: r.image_path,
            author: agg.author.into(),
            avg_score: r.avg_score,
            rating_count: r.rating_count,
            created_at: r.created_at.to_string(),
            updated_at: r.updated_at.to_string(),
            steps: agg
                .steps
                .into_iter()
                .map(|s| StepResponse {
                    step_order: s.step_order,
                    content: s.content,
                })
                .collect(),
            ingredients: agg
                .ingredients
                .into_iter()
                .map(|(link, ingredient)| IngredientLine {
                    ingredient_id: ingredient.id,
                    name: ingredient.name,
                    amount: link.amount,
                })
                .collect(),
            tags: agg.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PopularRecipeResponse {
    pub recipe_id: i32,
    pub title: String,
    pub description: String,
    pub cooking_time: Option<i32>,
    /// Null while unrated
    pub avg_score: Option<f64>,
    pub rating_count: i32,
    pub like_count: i64,
    pub comment_count: i64,
}

impl From<RecipeSummaryModel> for PopularRecipeResponse {
    fn from(s: RecipeSummaryModel) -> Self {
        Self {
            recipe_id: s.recipe_id,
            title: s.title,
            description: s.description,
            cooking_time: s.cooking_time,
            avg_score: s.avg_score,
            rating_count: s.rating_count,
            like_count: s.like_count,
            comment_count: s.comment_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploadResponse {
    pub image_path: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Recipes, newest first", body = PaginatedResponse<RecipeListItem>),
    ),
    tag = "recipes"
)]
pub async fn list_recipes(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    let (page, per_page) = params.resolve();
    let service = RecipeService::new(db);
    let (cards, total) = service.list(page, per_page).await?;
    let items = cards.into_iter().map(RecipeListItem::from).collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/popular",
    params(
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Recipes by popularity", body = PaginatedResponse<PopularRecipeResponse>),
    ),
    tag = "recipes"
)]
pub async fn popular_recipes(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    let (page, per_page) = params.resolve();
    let service = RecipeService::new(db);
    let (rows, total) = service.popular(page, per_page).await?;
    let items = rows.into_iter().map(PopularRecipeResponse::from).collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetailResponse),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "recipes"
)]
pub async fn get_recipe(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = RecipeService::new(db);
    let recipe = service.detail(id).await?;
    Ok(ApiResponse::ok(RecipeDetailResponse::from(recipe)))
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    security(("jwt_token" = [])),
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetailResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "recipes"
)]
pub async fn create_recipe(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Json(payload): Json<CreateRecipeRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let draft = RecipeDraft {
        title: payload.title,
        description: payload.description,
        cooking_time: payload.cooking_time,
        ingredients: payload.ingredients.into_iter().map(Into::into).collect(),
        steps: payload.steps.into_iter().map(Into::into).collect(),
        tag_ids: payload.tag_ids,
    };

    let service = RecipeService::new(db);
    let recipe = service.create(&principal, draft).await?;
    Ok(ApiResponse::ok(RecipeDetailResponse::from(recipe)).created())
}

#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDetailResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Not the author", body = AppError),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "recipes"
)]
pub async fn update_recipe(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRecipeRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let patch = RecipePatch {
        title: payload.title,
        description: payload.description,
        cooking_time: payload.cooking_time,
        ingredients: payload
            .ingredients
            .map(|items| items.into_iter().map(Into::into).collect()),
        steps: payload
            .steps
            .map(|items| items.into_iter().map(Into::into).collect()),
        tag_ids: payload.tag_ids,
    };

    let service = RecipeService::new(db);
    let recipe = service.update(&principal, id, patch).await?;
    Ok(ApiResponse::ok(RecipeDetailResponse::from(recipe)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 403, description = "Not the author", body = AppError),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "recipes"
)]
pub async fn delete_recipe(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = RecipeService::new(db);
    service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /recipes/{id}/image (multipart form: field "file")
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/image",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Image stored", body = ImageUploadResponse),
        (status = 400, description = "Missing or unsupported file", body = AppError),
        (status = 403, description = "Not the author", body = AppError),
        (status = 413, description = "File too large", body = AppError),
    ),
    tag = "recipes"
)]
pub async fn upload_recipe_image(
    Extension(db): Extension<DatabaseConnection>,
    Extension(blobs): Extension<SharedBlobStore>,
    principal: Principal,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file data: {}", e)))?;
        upload = Some((filename, data));
        break;
    }
    let (filename, data) = upload.ok_or_else(|| AppError::validation("No file provided"))?;

    let service = RecipeService::new(db);
    let image_path = service
        .set_image(&principal, id, blobs.as_ref(), &filename, &data)
        .await?;

    Ok(ApiResponse::ok(ImageUploadResponse { image_path }))
}
