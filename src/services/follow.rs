use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::MemberModel,
    repository,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

pub struct FollowService {
    db: DatabaseConnection,
}

impl FollowService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Toggle follow: if exists -> unfollow, if not -> follow.
    /// Returns true if now following, false if unfollowed.
    pub async fn toggle(&self, principal: &Principal, followee_id: i32) -> AppResult<bool> {
        if principal.member_id == followee_id {
            return Err(AppError::validation("Cannot follow yourself"));
        }

        let txn = self.db.begin().await?;

        // Verify target member exists
        repository::member::find_by_id(&txn, followee_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let removed =
            repository::engagement::delete_follow(&txn, principal.member_id, followee_id).await?;
        let following = if removed > 0 {
            false
        } else {
            repository::engagement::insert_follow(&txn, principal.member_id, followee_id).await?;
            true
        };

        txn.commit().await?;
        Ok(following)
    }

    /// Members that `member_id` follows, most recent first.
    pub async fn list_following(
        &self,
        member_id: i32,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<MemberModel>, u64)> {
        self.ensure_member(member_id).await?;
        let (follows, total) =
            repository::engagement::following_page(&self.db, member_id, page, per_page).await?;
        let ids: Vec<i32> = follows.iter().map(|f| f.followee_id).collect();
        Ok((self.members_in_order(&ids).await?, total))
    }

    /// Members following `member_id`, most recent first.
    pub async fn list_followers(
        &self,
        member_id: i32,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<MemberModel>, u64)> {
        self.ensure_member(member_id).await?;
        let (follows, total) =
            repository::engagement::followers_page(&self.db, member_id, page, per_page).await?;
        let ids: Vec<i32> = follows.iter().map(|f| f.follower_id).collect();
        Ok((self.members_in_order(&ids).await?, total))
    }

    async fn ensure_member(&self, member_id: i32) -> AppResult<()> {
        repository::member::find_by_id(&self.db, member_id)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(())
    }

    async fn members_in_order(&self, ids: &[i32]) -> AppResult<Vec<MemberModel>> {
        let mut by_id = repository::member::find_many(&self.db, ids).await?;
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
