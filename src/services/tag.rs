use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::TagModel,
    policy, repository,
};
use sea_orm::DatabaseConnection;

pub struct TagService {
    db: DatabaseConnection,
}

impl TagService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<TagModel>> {
        Ok(repository::tag::all(&self.db).await?)
    }

    /// Admin only. Tag names are unique.
    pub async fn create(&self, principal: &Principal, name: &str) -> AppResult<TagModel> {
        policy::require_admin(principal)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tag name must not be blank"));
        }

        repository::tag::insert(&self.db, name).await.map_err(|e| {
            AppError::from_unique_violation(e, || {
                AppError::Conflict(format!("Tag '{}' already exists", name))
            })
        })
    }
}
