use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    repository,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

pub struct LikeOutcome {
    pub liked: bool,
    pub like_count: u64,
}

pub struct LikeService {
    db: DatabaseConnection,
}

impl LikeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Toggle like: if exists -> unlike, if not -> like.
    pub async fn toggle(&self, principal: &Principal, recipe_id: i32) -> AppResult<LikeOutcome> {
        let txn = self.db.begin().await?;

        repository::recipe::find_by_id(&txn, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let removed = repository::engagement::delete_like(&txn, principal.member_id, recipe_id).await?;
        let liked = if removed > 0 {
            false
        } else {
            repository::engagement::insert_like(&txn, principal.member_id, recipe_id).await?;
            true
        };
        let like_count = repository::engagement::count_likes(&txn, recipe_id).await?;

        txn.commit().await?;

        tracing::debug!(member_id = principal.member_id, recipe_id, liked, "like toggled");
        Ok(LikeOutcome { liked, like_count })
    }
}
