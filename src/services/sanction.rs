use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::UserSanctionModel,
    policy, repository,
};
use sea_orm::DatabaseConnection;

pub struct SanctionService {
    db: DatabaseConnection,
}

impl SanctionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sanctions issued against `member_id`, newest first. Admin only.
    pub async fn list_for_member(
        &self,
        principal: &Principal,
        member_id: i32,
    ) -> AppResult<Vec<UserSanctionModel>> {
        policy::require_admin(principal)?;

        repository::member::find_by_id(&self.db, member_id)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(repository::moderation::sanctions_for(&self.db, member_id).await?)
    }
}
