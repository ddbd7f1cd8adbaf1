//! 预约的 HTTP 处理器

use crate::{
    auth::AuthContext,
    error::{AppError, ErrorResponse},
    models::{appointment::*, Page},
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
    path = "/api/v1/appointments",
    tag = "appointments",
    params(AppointmentFilter, Page),
    responses(
        (status = 200, description = "Appointments by schedule", body = [AppointmentResource]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Query(filter): Query<AppointmentFilter>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<AppointmentResource>>, AppError> {
    let appointments = state.appointment_service.list(&filter, page).await?;
    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResource::from)
            .collect(),
    ))
}

/// 预约维修，状态初始为 pending
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    tag = "appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created", body = AppointmentResource),
        (status = 400, description = "Invalid fields or technician", body = ErrorResponse),
        (status = 403, description = "Appliance belongs to someone else", body = ErrorResponse),
        (status = 404, description = "Appliance not found", body = ErrorResponse),
    )
)]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state
        .appointment_service
        .create(&auth_context, req)
        .await?;

    Ok((StatusCode::CREATED, Json(AppointmentResource::from(appointment))))
}

/// 预约详情（含电器、客户、技师与报告）
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment graph", body = AppointmentDetail),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentDetail>, AppError> {
    let aggregate = state.appointment_service.get_detail(id).await?;
    Ok(Json(aggregate.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment id")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentResource),
        (status = 400, description = "Invalid transition or technician", body = ErrorResponse),
        (status = 403, description = "Not a participant or an admin", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResource>, AppError> {
    let appointment = state
        .appointment_service
        .update(&auth_context, id, req)
        .await?;
    Ok(Json(appointment.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 403, description = "Not the client or an admin", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
    )
)]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .appointment_service
        .delete(&auth_context, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
