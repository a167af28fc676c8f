use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::handlers::auth::MemberSummary;
use crate::middleware::auth::Principal;
use crate::models::{MemberModel, RecipeCommentModel};
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::comment::CommentService;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Comment text; must not be blank
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    /// Comment being replied to, on the same recipe
    pub parent_comment_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub comment_id: i32,
    pub recipe_id: i32,
    pub parent_comment_id: Option<i32>,
    pub content: String,
    pub created_at: String,
    pub author: MemberSummary,
}

impl CommentResponse {
    fn new(c: RecipeCommentModel, author: MemberModel) -> Self {
        Self {
            comment_id: c.id,
            recipe_id: c.recipe_id,
            parent_comment_id: c.parent_comment_id,
            content: c.content,
            created_at: c.created_at.to_string(),
            author: author.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}/comments",
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Comments, oldest first", body = PaginatedResponse<CommentResponse>),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    Extension(db): Extension<DatabaseConnection>,
    Path(recipe_id): Path<i32>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    let (page, per_page) = params.resolve();
    let service = CommentService::new(db);
    let (rows, total) = service.list_by_recipe(recipe_id, page, per_page).await?;
    let items = rows
        .into_iter()
        .map(|(c, author)| CommentResponse::new(c, author))
        .collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/comments",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Blank content or bad parent", body = AppError),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "comments"
)]
pub async fn create_comment(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = CommentService::new(db);
    let (comment, author) = service
        .create(
            &principal,
            recipe_id,
            payload.parent_comment_id,
            &payload.content,
        )
        .await?;

    Ok(ApiResponse::ok(CommentResponse::new(comment, author)).created())
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author", body = AppError),
        (status = 404, description = "Comment not found", body = AppError),
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = CommentService::new(db);
    service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
