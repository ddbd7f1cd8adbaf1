//! 用户与认证的 HTTP 处理器

use crate::{
    auth::{AuthContext, TokenPair},
    error::{AppError, ErrorResponse},
    models::{user::*, Page},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 注册
#[utoipa::path(
    post,
    path = "/api/v1/users/sign-up",
    tag = "users",
    security(()),
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User registered", body = UserResource),
        (status = 400, description = "Invalid fields or weak password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.sign_up(req).await?;

    Ok((StatusCode::CREATED, Json(UserResource::from(user))))
}

/// 登录
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "users",
    security(()),
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (user, tokens) = state.user_service.login(req).await?;

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: UserResource::from(user),
    }))
}

/// 刷新令牌
#[utoipa::path(
    post,
    path = "/api/v1/users/refresh-token",
    tag = "users",
    security(()),
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenPair),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
    )
)]
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let tokens = state.user_service.refresh(&req.refresh_token).await?;
    Ok(Json(tokens))
}

/// 当前用户
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResource),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<Json<UserResource>, AppError> {
    let user = state.user_service.get(auth_context.user_id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(Page),
    responses(
        (status = 200, description = "Users", body = [UserResource]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Query(page): Query<Page>,
) -> Result<Json<Vec<UserResource>>, AppError> {
    let users = state.user_service.list(page).await?;
    Ok(Json(users.into_iter().map(UserResource::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResource),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<UserResource>, AppError> {
    let user = state.user_service.get(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResource),
        (status = 403, description = "Not the user or an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResource>, AppError> {
    let user = state.user_service.update(&auth_context, id, req).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Not the user or an admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete(&auth_context, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
