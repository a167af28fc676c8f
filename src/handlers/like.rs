use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::ApiResponse;
use crate::services::like::LikeService;
use axum::{extract::Path, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeToggleResponse {
    pub liked: bool,
    pub like_count: u64,
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/like",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Liked", body = LikeToggleResponse),
        (status = 200, description = "Like removed", body = LikeToggleResponse),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "engagement"
)]
pub async fn toggle_like(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(recipe_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = LikeService::new(db);
    let outcome = service.toggle(&principal, recipe_id).await?;
    Ok(ApiResponse::ok(LikeToggleResponse {
        liked: outcome.liked,
        like_count: outcome.like_count,
    })
    .created_if(outcome.liked))
}
