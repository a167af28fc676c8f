use crate::{
    error::{AppError, AppResult},
    middleware::auth::Principal,
    models::{report, ReportModel, ReportStatus, SanctionKind, UserSanctionModel},
    policy,
    repository::{self, moderation::ReportTarget},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};

const DUPLICATE_PENDING: &str = "You already have a pending report for this target";

pub struct ResolveOutcome {
    pub report: ReportModel,
    pub sanction: Option<UserSanctionModel>,
}

pub struct ReportService {
    db: DatabaseConnection,
}

impl ReportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// File a report. One pending report per reporter and target.
    pub async fn create_report(
        &self,
        principal: &Principal,
        target: ReportTarget,
        reason: &str,
    ) -> AppResult<ReportModel> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("Report reason must not be blank"));
        }

        // Verify target exists
        let exists = match target {
            ReportTarget::Recipe(id) => repository::recipe::find_by_id(&self.db, id)
                .await?
                .is_some(),
            ReportTarget::Comment(id) => repository::comment::find_by_id(&self.db, id)
                .await?
                .is_some(),
        };
        if !exists {
            return Err(AppError::NotFound);
        }

        if repository::moderation::pending_exists(&self.db, principal.member_id, target).await? {
            return Err(AppError::Conflict(DUPLICATE_PENDING.to_string()));
        }

        let report = repository::moderation::insert_report(
            &self.db,
            principal.member_id,
            target,
            reason.to_string(),
        )
        .await
        .map_err(|e| {
            AppError::from_unique_violation(e, || AppError::Conflict(DUPLICATE_PENDING.to_string()))
        })?;

        tracing::info!(
            report_id = report.id,
            member_id = principal.member_id,
            ?target,
            "report filed"
        );
        Ok(report)
    }

    /// Admin listing; PENDING unless another status is asked for.
    pub async fn list_reports(
        &self,
        principal: &Principal,
        status: Option<ReportStatus>,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<ReportModel>, u64)> {
        policy::require_admin(principal)?;
        let status = status.unwrap_or(ReportStatus::Pending);
        Ok(repository::moderation::reports_page(&self.db, status, page, per_page).await?)
    }

    /// Stamp the handler, apply the optional status and note, and on RESOLVED issue a
    /// WARNING to whoever owns the reported content. All of it commits together.
    pub async fn resolve_report(
        &self,
        principal: &Principal,
        report_id: i32,
        status: Option<ReportStatus>,
        handle_note: Option<String>,
    ) -> AppResult<ResolveOutcome> {
        policy::require_admin(principal)?;

        let txn = self.db.begin().await?;

        let existing = repository::moderation::lock_report(&txn, report_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if existing.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Report {} has already been handled",
                report_id
            )));
        }

        let target = ReportTarget::of(&existing);
        let new_status = status.unwrap_or(existing.status);
        let note = handle_note.map(|n| n.trim().to_string());

        let mut active: report::ActiveModel = existing.into_active_model();
        active.status = Set(new_status);
        if let Some(note) = &note {
            active.handle_note = Set(Some(note.clone()));
        }
        active.handled_by = Set(Some(principal.member_id));
        active.handled_at = Set(Some(chrono::Utc::now().naive_utc()));
        let report = repository::moderation::update_report(&txn, active).await?;

        let sanction = if new_status == ReportStatus::Resolved {
            self.issue_warning(&txn, principal, &report, target, note.as_deref())
                .await?
        } else {
            None
        };

        txn.commit().await?;

        tracing::info!(
            report_id,
            admin_id = principal.member_id,
            status = ?report.status,
            sanctioned = sanction.is_some(),
            "report handled"
        );
        Ok(ResolveOutcome { report, sanction })
    }

    /// `None` when the reported content has since been deleted.
    async fn issue_warning<C: ConnectionTrait>(
        &self,
        conn: &C,
        principal: &Principal,
        report: &ReportModel,
        target: Option<ReportTarget>,
        note: Option<&str>,
    ) -> AppResult<Option<UserSanctionModel>> {
        let owner_id = match target {
            Some(ReportTarget::Recipe(id)) => repository::recipe::find_by_id(conn, id)
                .await?
                .map(|r| r.author_id),
            Some(ReportTarget::Comment(id)) => repository::comment::find_by_id(conn, id)
                .await?
                .map(|c| c.author_id),
            None => None,
        };

        let Some(owner_id) = owner_id else {
            tracing::info!(report_id = report.id, "reported content is gone, no sanction issued");
            return Ok(None);
        };

        let reason = sanction_reason(report.id, note);
        let sanction = repository::moderation::insert_sanction(
            conn,
            owner_id,
            SanctionKind::Warning,
            reason,
            principal.member_id,
        )
        .await?;

        tracing::info!(
            report_id = report.id,
            member_id = owner_id,
            sanction_id = sanction.id,
            "warning issued"
        );
        Ok(Some(sanction))
    }
}

/// The admin's note when there is one, otherwise a message naming the report.
fn sanction_reason(report_id: i32, note: Option<&str>) -> String {
    match note.map(str::trim) {
        Some(note) if !note.is_empty() => note.to_string(),
        _ => format!("Sanction issued for report #{}", report_id),
    }
}
