//! 维修报告的 HTTP 处理器

use crate::{
    auth::AuthContext,
    error::{AppError, ErrorResponse},
    models::{report::*, Page},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "reports",
    params(ReportFilter, Page),
    responses(
        (status = 200, description = "Reports", body = [ReportResource]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Query(filter): Query<ReportFilter>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<ReportResource>>, AppError> {
    let reports = state.report_service.list(&filter, page).await?;
    Ok(Json(reports.into_iter().map(ReportResource::from).collect()))
}

/// 提交维修报告（技师或管理员）
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report created", body = ReportResource),
        (status = 403, description = "Caller is not a technician", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 409, description = "Appointment already has a report", body = ErrorResponse),
    )
)]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let report = state.report_service.create(&auth_context, req).await?;

    Ok((StatusCode::CREATED, Json(ReportResource::from(report))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report graph", body = ReportDetail),
        (status = 404, description = "Report not found", body = ErrorResponse),
    )
)]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<ReportDetail>, AppError> {
    let aggregate = state.report_service.get_detail(id).await?;
    Ok(Json(aggregate.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Updated report", body = ReportResource),
        (status = 403, description = "Not the author or an admin", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse),
    )
)]
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateReportRequest>,
) -> Result<Json<ReportResource>, AppError> {
    let report = state.report_service.update(&auth_context, id, req).await?;
    Ok(Json(report.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 403, description = "Not the author or an admin", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse),
    )
)]
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.report_service.delete(&auth_context, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
