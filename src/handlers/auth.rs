use crate::config::auth::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::Principal;
use crate::models::{MemberModel, MemberRole};
use crate::response::ApiResponse;
use crate::services::auth::{AuthService, MemberProfile};
use crate::utils::TokenService;
use axum::{response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Login id (1-50 characters, unique)
    #[validate(length(min = 1, max = 50))]
    pub login_id: String,
    /// Password
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    /// Display name (1-50 characters)
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

/// Public view of a member, embedded wherever a member is shown.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberSummary {
    pub member_id: i32,
    pub login_id: String,
    pub name: String,
    pub role: MemberRole,
}

impl From<MemberModel> for MemberSummary {
    fn from(m: MemberModel) -> Self {
        Self {
            member_id: m.id,
            login_id: m.login_id,
            name: m.name,
            role: m.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub member_id: i32,
    pub login_id: String,
    pub name: String,
    /// GOURMET, COOK or ADMIN
    pub role: MemberRole,
    pub created_at: String,
}

impl From<MemberModel> for MemberResponse {
    fn from(m: MemberModel) -> Self {
        Self {
            member_id: m.id,
            login_id: m.login_id,
            name: m.name,
            role: m.role,
            created_at: m.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub member: MemberResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub member_id: i32,
    pub login_id: String,
    pub name: String,
    pub role: MemberRole,
    pub created_at: String,
    /// Recipes authored by the member
    pub recipe_count: u64,
    /// Likes received across the member's recipes
    pub like_received_count: u64,
}

impl From<MemberProfile> for MeResponse {
    fn from(p: MemberProfile) -> Self {
        Self {
            member_id: p.member.id,
            login_id: p.member.login_id,
            name: p.member.name,
            role: p.member.role,
            created_at: p.member.created_at.to_string(),
            recipe_count: p.recipe_count,
            like_received_count: p.like_received_count,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Validation error or login id taken", body = AppError),
    ),
    tag = "auth"
)]
pub async fn signup(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<AuthConfig>,
    Extension(tokens): Extension<TokenService>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = AuthService::new(db, config, tokens);
    let member = service
        .signup(&payload.login_id, &payload.password, &payload.name)
        .await?;

    Ok(ApiResponse::ok(MemberResponse::from(member)).created())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<AuthConfig>,
    Extension(tokens): Extension<TokenService>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let expires_in = tokens.access_token_expiry();
    let service = AuthService::new(db, config, tokens);
    let (member, token) = service.login(&payload.login_id, &payload.password).await?;

    Ok(ApiResponse::ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in,
        member: member.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Current member", body = MeResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "auth"
)]
pub async fn me(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<AuthConfig>,
    Extension(tokens): Extension<TokenService>,
    principal: Principal,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db, config, tokens);
    let profile = service.me(&principal).await?;
    Ok(ApiResponse::ok(MeResponse::from(profile)))
}
