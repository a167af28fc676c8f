use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    repository,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// Denormalised rating figures stored on the recipe row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingAggregate {
    pub avg_score: Option<f64>,
    pub rating_count: i32,
}

impl RatingAggregate {
    /// Mean rounded to two decimal places; `None` with no scores.
    pub fn from_scores(scores: &[i32]) -> Self {
        if scores.is_empty() {
            return Self {
                avg_score: None,
                rating_count: 0,
            };
        }
        let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
        let mean = sum as f64 / scores.len() as f64;
        Self {
            avg_score: Some((mean * 100.0).round() / 100.0),
            rating_count: scores.len() as i32,
        }
    }
}

pub struct RatingOutcome {
    pub created: bool,
    pub score: i32,
    pub aggregate: RatingAggregate,
}

pub struct RatingService {
    db: DatabaseConnection,
}

impl RatingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or overwrite the caller's score and refresh the recipe's aggregate in the
    /// same transaction.
    pub async fn rate(
        &self,
        principal: &Principal,
        recipe_id: i32,
        score: i32,
    ) -> AppResult<RatingOutcome> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(AppError::Validation(format!(
                "score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }

        let txn = self.db.begin().await?;

        repository::recipe::lock_for_update(&txn, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let created = repository::engagement::find_rating(&txn, principal.member_id, recipe_id)
            .await?
            .is_none();
        repository::engagement::upsert_rating(&txn, principal.member_id, recipe_id, score).await?;
        let aggregate = recompute(&txn, recipe_id).await?;

        txn.commit().await?;

        tracing::debug!(
            member_id = principal.member_id,
            recipe_id,
            score,
            created,
            "rating stored"
        );
        Ok(RatingOutcome {
            created,
            score,
            aggregate,
        })
    }

    /// Remove the caller's rating. 404 if the recipe or the rating does not exist.
    pub async fn remove(&self, principal: &Principal, recipe_id: i32) -> AppResult<RatingAggregate> {
        let txn = self.db.begin().await?;

        repository::recipe::lock_for_update(&txn, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let removed =
            repository::engagement::delete_rating(&txn, principal.member_id, recipe_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound);
        }
        let aggregate = recompute(&txn, recipe_id).await?;

        txn.commit().await?;
        Ok(aggregate)
    }

    /// Stored aggregate plus the caller's own score when signed in.
    pub async fn summary(
        &self,
        principal: Option<&Principal>,
        recipe_id: i32,
    ) -> AppResult<(RatingAggregate, Option<i32>)> {
        let recipe = repository::recipe::find_by_id(&self.db, recipe_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let my_score = match principal {
            Some(p) => repository::engagement::find_rating(&self.db, p.member_id, recipe_id)
                .await?
                .map(|r| r.score),
            None => None,
        };

        Ok((
            RatingAggregate {
                avg_score: recipe.avg_score,
                rating_count: recipe.rating_count,
            },
            my_score,
        ))
    }
}

async fn recompute<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> AppResult<RatingAggregate> {
    let scores = repository::engagement::scores(conn, recipe_id).await?;
    let aggregate = RatingAggregate::from_scores(&scores);
    repository::recipe::set_rating_aggregate(
        conn,
        recipe_id,
        aggregate.avg_score,
        aggregate.rating_count,
    )
    .await?;
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scores_means_unrated() {
        let agg = RatingAggregate::from_scores(&[]);
        assert_eq!(agg.avg_score, None);
        assert_eq!(agg.rating_count, 0);
    }

    #[test]
    fn single_score_is_its_own_mean() {
        let agg = RatingAggregate::from_scores(&[3]);
        assert_eq!(agg.avg_score, Some(3.0));
        assert_eq!(agg.rating_count, 1);
    }

    #[test]
    fn mean_rounds_to_two_places() {
        // 13 / 3 = 4.333...
        assert_eq!(RatingAggregate::from_scores(&[5, 4, 4]).avg_score, Some(4.33));
        // 14 / 3 = 4.666...
        assert_eq!(RatingAggregate::from_scores(&[5, 5, 4]).avg_score, Some(4.67));
        assert_eq!(RatingAggregate::from_scores(&[1, 2]).avg_score, Some(1.5));
    }

    #[test]
    fn count_tracks_every_score() {
        let agg = RatingAggregate::from_scores(&[1, 1, 1, 5, 5, 5, 3]);
        assert_eq!(agg.rating_count, 7);
        assert_eq!(agg.avg_score, Some(3.0));
    }
}
