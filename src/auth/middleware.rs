//! JWT 认证中间件

use crate::{
    error::AppError,
    models::user::{User, UserRole},
    state::AppState,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 本人或管理员
    pub fn require_self_or_admin(&self, owner_id: i64) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn require_any_role(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl From<&User> for AuthContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role(),
        }
    }
}

// 受保护的 handler 通过提取 AuthContext 完成授权，缺失时返回 401
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从 Authorization 头提取令牌
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// JWT 中间件
///
/// 令牌有效且用户仍存在时附加 AuthContext；否则不附加，也不拒绝请求，
/// 由后续的授权阶段决定是否返回 401。
/// 加载用户失败（如数据库不可用）时直接返回该错误。
pub async fn jwt_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Ok(token) = extract_token(req.headers()) {
        match state
            .token_service
            .validate_access_token(&token)
            .and_then(|claims| claims.user_id())
        {
            Ok(user_id) => match state.user_service.find_by_id(user_id).await {
                Ok(Some(user)) => {
                    req.extensions_mut().insert(AuthContext::from(&user));
                }
                Ok(None) => {
                    tracing::debug!(user_id, "Token subject no longer exists");
                }
                Err(e) => {
                    tracing::error!(user_id, "Failed to load token subject: {}", e);
                    return e.into_response();
                }
            },
            Err(_) => {
                tracing::debug!("Ignoring invalid bearer token");
            }
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        let token = extract_token(&headers).unwrap();
        assert_eq!(token, "test_token_123");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "InvalidFormat".parse().unwrap());
        assert!(extract_token(&headers).is_err());

        headers.insert("authorization", "Bearer ".parse().unwrap());
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_require_self_or_admin() {
        let client = AuthContext {
            user_id: 1,
            email: "c@example.com".to_string(),
            role: UserRole::Client,
        };
        assert!(client.require_self_or_admin(1).is_ok());
        assert!(matches!(client.require_self_or_admin(2), Err(AppError::Forbidden)));

        let admin = AuthContext {
            role: UserRole::Admin,
            ..client
        };
        assert!(admin.require_self_or_admin(2).is_ok());
    }

    #[test]
    fn test_require_any_role() {
        let tech = AuthContext {
            user_id: 5,
            email: "t@example.com".to_string(),
            role: UserRole::Technician,
        };
        assert!(tech
            .require_any_role(&[UserRole::Technician, UserRole::Admin])
            .is_ok());
        assert!(tech.require_any_role(&[UserRole::Admin]).is_err());
    }
}
