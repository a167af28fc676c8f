use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::{MaybePrincipal, Principal};
use crate::response::ApiResponse;
use crate::services::rating::{RatingAggregate, RatingService};
use axum::{extract::Path, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RateRequest {
    /// Integer score from 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub score: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    /// Mean score rounded to two places; null while unrated
    pub avg_score: Option<f64>,
    pub rating_count: i32,
    /// The caller's own score, when signed in and rated
    pub my_score: Option<i32>,
}

impl RatingResponse {
    fn new(aggregate: RatingAggregate, my_score: Option<i32>) -> Self {
        Self {
            avg_score: aggregate.avg_score,
            rating_count: aggregate.rating_count,
            my_score,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}/rating",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Rating aggregate", body = RatingResponse),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "engagement"
)]
pub async fn get_rating(
    Extension(db): Extension<DatabaseConnection>,
    MaybePrincipal(principal): MaybePrincipal,
    Path(recipe_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = RatingService::new(db);
    let (aggregate, my_score) = service.summary(principal.as_ref(), recipe_id).await?;
    Ok(ApiResponse::ok(RatingResponse::new(aggregate, my_score)))
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/rating",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = RateRequest,
    responses(
        (status = 201, description = "Rating created", body = RatingResponse),
        (status = 200, description = "Rating updated", body = RatingResponse),
        (status = 400, description = "Score out of range", body = AppError),
        (status = 404, description = "Recipe not found", body = AppError),
    ),
    tag = "engagement"
)]
pub async fn rate_recipe(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<RateRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = RatingService::new(db);
    let outcome = service.rate(&principal, recipe_id, payload.score).await?;
    Ok(
        ApiResponse::ok(RatingResponse::new(outcome.aggregate, Some(outcome.score)))
            .created_if(outcome.created),
    )
}

#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/rating",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Rating removed", body = RatingResponse),
        (status = 404, description = "No rating to remove", body = AppError),
    ),
    tag = "engagement"
)]
pub async fn delete_rating(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(recipe_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = RatingService::new(db);
    let aggregate = service.remove(&principal, recipe_id).await?;
    Ok(ApiResponse::ok(RatingResponse::new(aggregate, None)))
}
