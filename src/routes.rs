//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{api_doc, handlers, state::AppState};

/// 创建应用路由
///
/// 中间件顺序（由外到内）：请求追踪 → TraceLayer → Swagger → 请求体限制 → JWT
/// → HTTPS 重定向 → CORS → 授权 → handler。
/// 授权由受保护 handler 的 `AuthContext` 提取器完成。
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/v1/users/sign-up", post(handlers::users::sign_up))
        .route("/api/v1/users/login", post(handlers::users::login))
        .route("/api/v1/users/refresh-token", post(handlers::users::refresh_token));

    // 需要认证的路由
    let protected_routes = Router::new()
        .route("/api/v1/users", get(handlers::users::list_users))
        .route("/api/v1/users/me", get(handlers::users::get_current_user))
        .route(
            "/api/v1/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/api/v1/appliances",
            get(handlers::appliances::list_appliances)
                .post(handlers::appliances::create_appliance),
        )
        .route(
            "/api/v1/appliances/{id}",
            get(handlers::appliances::get_appliance)
                .put(handlers::appliances::update_appliance)
                .delete(handlers::appliances::delete_appliance),
        )
        .route(
            "/api/v1/appointments",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/v1/appointments/{id}",
            get(handlers::appointments::get_appointment)
                .put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        )
        .route(
            "/api/v1/reports",
            get(handlers::reports::list_reports).post(handlers::reports::create_report),
        )
        .route(
            "/api/v1/reports/{id}",
            get(handlers::reports::get_report)
                .put(handlers::reports::update_report)
                .delete(handlers::reports::delete_report),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 后添加的 layer 位于外层
    let api_routes = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::https_redirect_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::jwt_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(state.config.server.max_body_bytes))
        .with_state(state);

    Router::new()
        .merge(api_doc::swagger_ui())
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
}
