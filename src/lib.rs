pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod policy;
pub mod repository;
pub mod response;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use config::auth::AuthConfig;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde_json::json;
use std::env;
use storage::SharedBlobStore;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utils::jwt::TokenService;
use utoipa::OpenApi;

pub use error::{AppError, AppResult};
pub use middleware::auth::{MaybePrincipal, Principal};
pub use response::{ApiResponse, PaginatedResponse, PaginationQuery};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Auth routes
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        // Recipe routes
        crate::handlers::recipe::list_recipes,
        crate::handlers::recipe::popular_recipes,
        crate::handlers::recipe::get_recipe,
        crate::handlers::recipe::create_recipe,
        crate::handlers::recipe::update_recipe,
        crate::handlers::recipe::delete_recipe,
        crate::handlers::recipe::upload_recipe_image,
        // Like and rating routes
        crate::handlers::like::toggle_like,
        crate::handlers::rating::get_rating,
        crate::handlers::rating::rate_recipe,
        crate::handlers::rating::delete_rating,
        // Comment routes
        crate::handlers::comment::list_comments,
        crate::handlers::comment::create_comment,
        crate::handlers::comment::delete_comment,
        // Follow routes
        crate::handlers::follow::toggle_follow,
        crate::handlers::follow::list_followers,
        crate::handlers::follow::list_following,
        // Tag routes
        crate::handlers::tag::list_tags,
        crate::handlers::tag::create_tag,
        // Report routes
        crate::handlers::report::report_recipe,
        crate::handlers::report::report_comment,
        crate::handlers::report::list_reports,
        crate::handlers::report::resolve_report,
        crate::handlers::report::list_member_sanctions,
    ),
    components(
        schemas(
            crate::response::ApiResponse<serde_json::Value>,
            crate::response::PaginatedResponse<serde_json::Value>,
            crate::response::PaginationQuery,
            crate::error::AppError,
            crate::models::MemberRole,
            crate::models::ReportStatus,
            crate::models::ReportTargetType,
            crate::models::SanctionKind,
            // Auth
            crate::handlers::auth::SignupRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::LoginResponse,
            crate::handlers::auth::MemberSummary,
            crate::handlers::auth::MemberResponse,
            crate::handlers::auth::MeResponse,
            // Recipe
            crate::handlers::recipe::IngredientInput,
            crate::handlers::recipe::StepInput,
            crate::handlers::recipe::CreateRecipeRequest,
            crate::handlers::recipe::UpdateRecipeRequest,
            crate::handlers::recipe::RecipeListItem,
            crate::handlers::recipe::RecipeDetailResponse,
            crate::handlers::recipe::StepResponse,
            crate::handlers::recipe::IngredientLine,
            crate::handlers::recipe::PopularRecipeResponse,
            crate::handlers::recipe::ImageUploadResponse,
            // Like and rating
            crate::handlers::like::LikeToggleResponse,
            crate::handlers::rating::RateRequest,
            crate::handlers::rating::RatingResponse,
            // Comment
            crate::handlers::comment::CreateCommentRequest,
            crate::handlers::comment::CommentResponse,
            // Follow
            crate::handlers::follow::FollowToggleResponse,
            // Tag
            crate::handlers::tag::TagResponse,
            crate::handlers::tag::CreateTagRequest,
            // Report
            crate::handlers::report::CreateReportRequest,
            crate::handlers::report::ListReportsQuery,
            crate::handlers::report::ResolveReportRequest,
            crate::handlers::report::ReportResponse,
            crate::handlers::report::ResolveReportResponse,
            crate::handlers::report::SanctionResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and the current member"),
        (name = "recipes", description = "Recipe management operations"),
        (name = "engagement", description = "Likes and ratings"),
        (name = "comments", description = "Recipe comments"),
        (name = "follows", description = "Follow operations"),
        (name = "tags", description = "Tag operations"),
        (name = "reports", description = "Reporting recipes and comments"),
        (name = "admin", description = "Moderation operations"),
    )
)]
pub struct ApiDoc;

/// Everything the handlers pull out of request extensions.
#[derive(Clone)]
pub struct AppServices {
    pub db: DatabaseConnection,
    pub tokens: TokenService,
    pub auth: AuthConfig,
    pub blobs: SharedBlobStore,
}

/// Build the full router: API routes, uploaded files under `/uploads`, and the OpenAPI document.
pub fn create_app(services: AppServices, upload_dir: &str) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(routes::create_routes())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(Extension(services.db))
        .layer(Extension(services.tokens))
        .layer(Extension(services.auth))
        .layer(Extension(services.blobs))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check(Extension(db): Extension<DatabaseConnection>) -> impl IntoResponse {
    let db_ok = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
        .is_ok();

    let status = if db_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "RecipeHub API",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_ok,
    }))
}
