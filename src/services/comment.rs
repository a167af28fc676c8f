use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::{MemberModel, RecipeCommentModel},
    policy, repository,
};
use sea_orm::DatabaseConnection;

pub struct CommentService {
    db: DatabaseConnection,
}

impl CommentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Comments on a recipe with their authors, oldest first.
    pub async fn list_by_recipe(
        &self,
        recipe_id: i32,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<(RecipeCommentModel, MemberModel)>, u64)> {
        repository::recipe::find_by_id(&self.db, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let (comments, total) =
            repository::comment::page_for_recipe(&self.db, recipe_id, page, per_page).await?;
        let author_ids: Vec<i32> = comments.iter().map(|c| c.author_id).collect();
        let authors = repository::member::find_many(&self.db, &author_ids).await?;

        let items = comments
            .into_iter()
            .filter_map(|c| authors.get(&c.author_id).cloned().map(|a| (c, a)))
            .collect();
        Ok((items, total))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        recipe_id: i32,
        parent_comment_id: Option<i32>,
        content: &str,
    ) -> AppResult<(RecipeCommentModel, MemberModel)> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment content must not be blank"));
        }

        repository::recipe::find_by_id(&self.db, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(pid) = parent_comment_id {
            self.validate_parent(pid, recipe_id).await?;
        }

        let author = repository::member::find_by_id(&self.db, principal.member_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let comment = repository::comment::insert(
            &self.db,
            recipe_id,
            principal.member_id,
            parent_comment_id,
            content.to_string(),
        )
        .await?;
        Ok((comment, author))
    }

    /// Author or admin only. Replies go with the comment.
    pub async fn delete(&self, principal: &Principal, comment_id: i32) -> AppResult<()> {
        let comment = repository::comment::find_by_id(&self.db, comment_id)
            .await?
            .ok_or(AppError::NotFound)?;

        policy::ensure_can_modify(principal, comment.author_id)?;

        repository::comment::delete(&self.db, comment_id).await?;
        tracing::debug!(member_id = principal.member_id, comment_id, "comment deleted");
        Ok(())
    }

    /// A reply must answer a comment on the same recipe.
    async fn validate_parent(&self, parent_id: i32, recipe_id: i32) -> AppResult<()> {
        let parent = repository::comment::find_by_id(&self.db, parent_id)
            .await?
            .ok_or_else(|| AppError::validation("Parent comment not found"))?;

        if parent.recipe_id != recipe_id {
            return Err(AppError::validation(
                "Parent comment belongs to a different recipe",
            ));
        }
        Ok(())
    }
}
