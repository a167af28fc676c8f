use super::page_index;
use crate::models::{
    report, user_sanction, Report, ReportModel, ReportStatus, ReportTargetType, SanctionKind,
    UserSanction, UserSanctionModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Where a report points. Exactly one of the two id columns is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Recipe(i32),
    Comment(i32),
}

impl ReportTarget {
    pub fn target_type(&self) -> ReportTargetType {
        match self {
            ReportTarget::Recipe(_) => ReportTargetType::Recipe,
            ReportTarget::Comment(_) => ReportTargetType::Comment,
        }
    }

    fn columns(&self) -> (Option<i32>, Option<i32>) {
        match *self {
            ReportTarget::Recipe(id) => (Some(id), None),
            ReportTarget::Comment(id) => (None, Some(id)),
        }
    }

    /// The target a stored report still points at, if it has not been deleted since.
    pub fn of(report: &ReportModel) -> Option<Self> {
        match report.target_type {
            ReportTargetType::Recipe => report.recipe_id.map(ReportTarget::Recipe),
            ReportTargetType::Comment => report.comment_id.map(ReportTarget::Comment),
        }
    }
}

/// Row-locks the report until the transaction ends, so concurrent handlers see each other's status.
pub async fn lock_report<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<ReportModel>, DbErr> {
    Report::find_by_id(id).lock_exclusive().one(conn).await
}

pub async fn pending_exists<C: ConnectionTrait>(
    conn: &C,
    reporter_id: i32,
    target: ReportTarget,
) -> Result<bool, DbErr> {
    let mut query = Report::find()
        .filter(report::Column::ReporterId.eq(reporter_id))
        .filter(report::Column::Status.eq(ReportStatus::Pending))
        .filter(report::Column::TargetType.eq(target.target_type()));
    query = match target {
        ReportTarget::Recipe(id) => query.filter(report::Column::RecipeId.eq(id)),
        ReportTarget::Comment(id) => query.filter(report::Column::CommentId.eq(id)),
    };
    Ok(query.count(conn).await? > 0)
}

pub async fn insert_report<C: ConnectionTrait>(
    conn: &C,
    reporter_id: i32,
    target: ReportTarget,
    reason: String,
) -> Result<ReportModel, DbErr> {
    let (recipe_id, comment_id) = target.columns();
    report::ActiveModel {
        reporter_id: Set(reporter_id),
        target_type: Set(target.target_type()),
        recipe_id: Set(recipe_id),
        comment_id: Set(comment_id),
        reason: Set(reason),
        status: Set(ReportStatus::Pending),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Most recent first.
pub async fn reports_page<C: ConnectionTrait>(
    conn: &C,
    status: ReportStatus,
    page: u64,
    per_page: u64,
) -> Result<(Vec<ReportModel>, u64), DbErr> {
    let paginator = Report::find()
        .filter(report::Column::Status.eq(status))
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index(page)).await?;
    Ok((items, total))
}

pub async fn update_report<C: ConnectionTrait>(
    conn: &C,
    model: report::ActiveModel,
) -> Result<ReportModel, DbErr> {
    model.update(conn).await
}

pub async fn insert_sanction<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
    kind: SanctionKind,
    reason: String,
    created_by: i32,
) -> Result<UserSanctionModel, DbErr> {
    let now = chrono::Utc::now().naive_utc();
    user_sanction::ActiveModel {
        member_id: Set(member_id),
        sanction: Set(kind),
        reason: Set(reason),
        start_at: Set(now),
        end_at: Set(None),
        created_by: Set(Some(created_by)),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Newest first.
pub async fn sanctions_for<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
) -> Result<Vec<UserSanctionModel>, DbErr> {
    UserSanction::find()
        .filter(user_sanction::Column::MemberId.eq(member_id))
        .order_by_desc(user_sanction::Column::CreatedAt)
        .order_by_desc(user_sanction::Column::Id)
        .all(conn)
        .await
}
