use crate::error::{AppError, AppResult};
use crate::handlers::auth::MemberSummary;
use crate::middleware::auth::Principal;
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::follow::FollowService;
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowToggleResponse {
    pub following: bool,
}

#[utoipa::path(
    post,
    path = "/api/v1/members/{id}/follow",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Member to follow or unfollow")),
    responses(
        (status = 201, description = "Now following", body = FollowToggleResponse),
        (status = 200, description = "Unfollowed", body = FollowToggleResponse),
        (status = 400, description = "Cannot follow yourself", body = AppError),
        (status = 404, description = "Member not found", body = AppError),
    ),
    tag = "follows"
)]
pub async fn toggle_follow(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(member_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = FollowService::new(db);
    let following = service.toggle(&principal, member_id).await?;
    Ok(ApiResponse::ok(FollowToggleResponse { following }).created_if(following))
}

#[utoipa::path(
    get,
    path = "/api/v1/members/{id}/followers",
    params(
        ("id" = i32, Path, description = "Member ID"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Followers, most recent first", body = PaginatedResponse<MemberSummary>),
        (status = 404, description = "Member not found", body = AppError),
    ),
    tag = "follows"
)]
pub async fn list_followers(
    Extension(db): Extension<DatabaseConnection>,
    Path(member_id): Path<i32>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    let (page, per_page) = params.resolve();
    let service = FollowService::new(db);
    let (members, total) = service.list_followers(member_id, page, per_page).await?;
    let items = members.into_iter().map(MemberSummary::from).collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/members/{id}/following",
    params(
        ("id" = i32, Path, description = "Member ID"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Followed members, most recent first", body = PaginatedResponse<MemberSummary>),
        (status = 404, description = "Member not found", body = AppError),
    ),
    tag = "follows"
)]
pub async fn list_following(
    Extension(db): Extension<DatabaseConnection>,
    Path(member_id): Path<i32>,
    Query(params): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    let (page, per_page) = params.resolve();
    let service = FollowService::new(db);
    let (members, total) = service.list_following(member_id, page, per_page).await?;
    let items = members.into_iter().map(MemberSummary::from).collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}
