use crate::{
    config::auth::AuthConfig,
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::MemberModel,
    repository,
    utils::{hash_password, verify_password, TokenService},
};
use sea_orm::DatabaseConnection;

const BAD_CREDENTIALS: &str = "Invalid login id or password";

/// Current member plus the counters shown on their own profile.
pub struct MemberProfile {
    pub member: MemberModel,
    pub recipe_count: u64,
    pub like_received_count: u64,
}

pub struct AuthService {
    db: DatabaseConnection,
    config: AuthConfig,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, config: AuthConfig, tokens: TokenService) -> Self {
        Self { db, config, tokens }
    }

    /// Register a new member. Every signup starts as GOURMET.
    pub async fn signup(&self, login_id: &str, password: &str, name: &str) -> AppResult<MemberModel> {
        let login_id = login_id.trim();
        let name = name.trim();
        if login_id.is_empty() || name.is_empty() {
            return Err(AppError::validation("login_id and name must not be blank"));
        }

        if repository::member::find_by_login_id(&self.db, login_id)
            .await?
            .is_some()
        {
            return Err(AppError::validation("login_id already in use"));
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        let member = repository::member::insert(&self.db, login_id, password_hash, name)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || AppError::validation("login_id already in use"))
            })?;

        tracing::info!(member_id = member.id, "member signed up");
        Ok(member)
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, login_id: &str, password: &str) -> AppResult<(MemberModel, String)> {
        let member = repository::member::find_by_login_id(&self.db, login_id.trim())
            .await?
            .ok_or_else(|| AppError::validation(BAD_CREDENTIALS))?;

        if !verify_password(password, &member.password_hash) {
            tracing::debug!(member_id = member.id, "password mismatch");
            return Err(AppError::validation(BAD_CREDENTIALS));
        }

        let token = self.tokens.issue_token(member.id, member.role)?;
        Ok((member, token))
    }

    pub async fn me(&self, principal: &Principal) -> AppResult<MemberProfile> {
        let member = repository::member::find_by_id(&self.db, principal.member_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        let recipe_count = repository::member::count_recipes(&self.db, member.id).await?;
        let like_received_count =
            repository::member::count_likes_received(&self.db, member.id).await?;

        Ok(MemberProfile {
            member,
            recipe_count,
            like_received_count,
        })
    }
}
