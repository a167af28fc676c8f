use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::Principal;
use crate::models::{ReportModel, ReportStatus, ReportTargetType, SanctionKind, UserSanctionModel};
use crate::repository::moderation::ReportTarget;
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::report::ReportService;
use crate::services::sanction::SanctionService;
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    /// Why the content is being reported
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListReportsQuery {
    /// PENDING (default), RESOLVED or REJECTED
    pub status: Option<String>,
    /// Page number
    pub page: Option<u64>,
    /// Items per page
    pub per_page: Option<u64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResolveReportRequest {
    /// New status; omit to only record the note
    pub status: Option<String>,
    /// Handler's note; may be blank
    #[validate(length(max = 1000))]
    pub handle_note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    pub report_id: i32,
    pub reporter_id: i32,
    pub target_type: ReportTargetType,
    /// Null for comment reports, or once the recipe is deleted
    pub recipe_id: Option<i32>,
    /// Null for recipe reports, or once the comment is deleted
    pub comment_id: Option<i32>,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: String,
    pub handled_by: Option<i32>,
    pub handled_at: Option<String>,
    pub handle_note: Option<String>,
}

impl From<ReportModel> for ReportResponse {
    fn from(r: ReportModel) -> Self {
        Self {
            report_id: r.id,
            reporter_id: r.reporter_id,
            target_type: r.target_type,
            recipe_id: r.recipe_id,
            comment_id: r.comment_id,
            reason: r.reason,
            status: r.status,
            created_at: r.created_at.to_string(),
            handled_by: r.handled_by,
            handled_at: r.handled_at.map(|t| t.to_string()),
            handle_note: r.handle_note,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SanctionResponse {
    pub sanction_id: i32,
    pub member_id: i32,
    pub sanction: SanctionKind,
    pub reason: String,
    pub start_at: String,
    pub end_at: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: String,
}

impl From<UserSanctionModel> for SanctionResponse {
    fn from(s: UserSanctionModel) -> Self {
        Self {
            sanction_id: s.id,
            member_id: s.member_id,
            sanction: s.sanction,
            reason: s.reason,
            start_at: s.start_at.to_string(),
            end_at: s.end_at.map(|t| t.to_string()),
            created_by: s.created_by,
            created_at: s.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolveReportResponse {
    pub report: ReportResponse,
    /// Warning issued to the content owner on RESOLVED, if the content still exists
    pub sanction: Option<SanctionResponse>,
}

fn parse_status(raw: Option<&str>) -> AppResult<Option<ReportStatus>> {
    raw.map(|s| {
        ReportStatus::parse(s).ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid status '{}'. Expected PENDING, RESOLVED or REJECTED",
                s
            ))
        })
    })
    .transpose()
}

async fn file_report(
    db: DatabaseConnection,
    principal: Principal,
    target: ReportTarget,
    payload: CreateReportRequest,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;

    let service = ReportService::new(db);
    let report = service
        .create_report(&principal, target, &payload.reason)
        .await?;
    Ok(ApiResponse::ok(ReportResponse::from(report)).created())
}

#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/report",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report filed", body = ReportResponse),
        (status = 400, description = "Blank reason", body = AppError),
        (status = 404, description = "Recipe not found", body = AppError),
        (status = 409, description = "A pending report already exists", body = AppError),
    ),
    tag = "reports"
)]
pub async fn report_recipe(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(recipe_id): Path<i32>,
    Json(payload): Json<CreateReportRequest>,
) -> AppResult<impl IntoResponse> {
    file_report(db, principal, ReportTarget::Recipe(recipe_id), payload).await
}

#[utoipa::path(
    post,
    path = "/api/v1/comments/{id}/report",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report filed", body = ReportResponse),
        (status = 400, description = "Blank reason", body = AppError),
        (status = 404, description = "Comment not found", body = AppError),
        (status = 409, description = "A pending report already exists", body = AppError),
    ),
    tag = "reports"
)]
pub async fn report_comment(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(comment_id): Path<i32>,
    Json(payload): Json<CreateReportRequest>,
) -> AppResult<impl IntoResponse> {
    file_report(db, principal, ReportTarget::Comment(comment_id), payload).await
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/reports",
    security(("jwt_token" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by status, default PENDING"),
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Reports, most recent first", body = PaginatedResponse<ReportResponse>),
        (status = 400, description = "Invalid status", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_reports(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Query(params): Query<ListReportsQuery>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status(params.status.as_deref())?;
    let (page, per_page) = PaginationQuery {
        page: params.page,
        per_page: params.per_page,
    }
    .resolve();

    let service = ReportService::new(db);
    let (reports, total) = service
        .list_reports(&principal, status, page, per_page)
        .await?;
    let items = reports.into_iter().map(ReportResponse::from).collect();
    Ok(ApiResponse::ok(PaginatedResponse::new(
        items, total, page, per_page,
    )))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/reports/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Report ID")),
    request_body = ResolveReportRequest,
    responses(
        (status = 200, description = "Report handled", body = ResolveReportResponse),
        (status = 400, description = "Invalid status", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Report not found", body = AppError),
        (status = 409, description = "Report already handled", body = AppError),
    ),
    tag = "admin"
)]
pub async fn resolve_report(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(id): Path<i32>,
    Json(payload): Json<ResolveReportRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation error: {e}")))?;
    let status = parse_status(payload.status.as_deref())?;

    let service = ReportService::new(db);
    let outcome = service
        .resolve_report(&principal, id, status, payload.handle_note)
        .await?;

    Ok(ApiResponse::ok(ResolveReportResponse {
        report: outcome.report.into(),
        sanction: outcome.sanction.map(SanctionResponse::from),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/members/{id}/sanctions",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Sanctions, newest first", body = Vec<SanctionResponse>),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Member not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_member_sanctions(
    Extension(db): Extension<DatabaseConnection>,
    principal: Principal,
    Path(member_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = SanctionService::new(db);
    let sanctions = service.list_for_member(&principal, member_id).await?;
    let items: Vec<SanctionResponse> = sanctions.into_iter().map(SanctionResponse::from).collect();
    Ok(ApiResponse::ok(items))
}
