//! 电器的 HTTP 处理器

use crate::{
    auth::AuthContext,
    error::{AppError, ErrorResponse},
    models::{appliance::*, Page},
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
    path = "/api/v1/appliances",
    tag = "appliances",
    params(ApplianceFilter, Page),
    responses(
        (status = 200, description = "Appliances", body = [ApplianceResource]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_appliances(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Query(filter): Query<ApplianceFilter>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<ApplianceResource>>, AppError> {
    let appliances = state.appliance_service.list(&filter, page).await?;
    Ok(Json(appliances.into_iter().map(ApplianceResource::from).collect()))
}

/// 为当前用户登记电器
#[utoipa::path(
    post,
    path = "/api/v1/appliances",
    tag = "appliances",
    request_body = CreateApplianceRequest,
    responses(
        (status = 201, description = "Appliance created", body = ApplianceResource),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn create_appliance(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateApplianceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let appliance = state.appliance_service.create(&auth_context, req).await?;

    Ok((StatusCode::CREATED, Json(ApplianceResource::from(appliance))))
}

#[utoipa::path(
    get,
    path = "/api/v1/appliances/{id}",
    tag = "appliances",
    params(("id" = i64, Path, description = "Appliance id")),
    responses(
        (status = 200, description = "Appliance", body = ApplianceResource),
        (status = 404, description = "Appliance not found", body = ErrorResponse),
    )
)]
pub async fn get_appliance(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<ApplianceResource>, AppError> {
    let appliance = state.appliance_service.get(id).await?;
    Ok(Json(appliance.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/appliances/{id}",
    tag = "appliances",
    params(("id" = i64, Path, description = "Appliance id")),
    request_body = UpdateApplianceRequest,
    responses(
        (status = 200, description = "Updated appliance", body = ApplianceResource),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
        (status = 404, description = "Appliance not found", body = ErrorResponse),
    )
)]
pub async fn update_appliance(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateApplianceRequest>,
) -> Result<Json<ApplianceResource>, AppError> {
    let appliance = state
        .appliance_service
        .update(&auth_context, id, req)
        .await?;
    Ok(Json(appliance.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/appliances/{id}",
    tag = "appliances",
    params(("id" = i64, Path, description = "Appliance id")),
    responses(
        (status = 204, description = "Appliance deleted"),
        (status = 403, description = "Not the owner or an admin", body = ErrorResponse),
        (status = 404, description = "Appliance not found", body = ErrorResponse),
    )
)]
pub async fn delete_appliance(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.appliance_service.delete(&auth_context, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
