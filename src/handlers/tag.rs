use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::Principal;
use crate::models::TagModel;
use crate::response::ApiResponse;
use crate::services::tag::TagService;
use axum::{response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct TagResponse {
    pub tag_id: i32,
    pub name: String,
}

impl From<TagModel> for TagResponse {
    fn from(t: TagModel) -> Self {
        Self {
            tag_id: t.id,
            name: t.name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTagRequest {
    /// Tag name (1-50 characters, unique)
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "All tags by name", body = Vec<TagResponse>),
    ),
    tag = "tags"
)]
pub async fn list_tags(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = TagService::new(db);
    let tags = service.list().await?;
    let items: Vec<TagResponse> = tags.into_iter().map(TagResponse::from).collect();
    Ok(ApiResponse::ok(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/tags",
    security(("jwt_token" = [])),
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 403, description = "Admin only", body = AppError),
        (status = 409, description = "Tag already exists", body = AppError),
    ),
    tag = "tags"
)]
pub async fn create_tag(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Json(payload): Json<CreateTagRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = TagService::new(db);
    let tag = service.create(&principal, &payload.name).await?;
    Ok(ApiResponse::ok(TagResponse::from(tag)).created())
}
