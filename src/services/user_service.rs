//! 用户服务：注册、登录、令牌刷新、用户管理

use crate::{
    auth::{AuthContext, PasswordHasher, TokenPair, TokenService},
    error::AppError,
    mapper::resource_to_model::{new_user, normalize_email},
    models::{user::*, Page},
    repository::UserRepository,
};
use std::sync::Arc;
use validator::Validate;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    token_service: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        token_service: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            token_service,
            hasher,
        }
    }

    /// 用户注册
    pub async fn sign_up(&self, req: SignUpRequest) -> Result<User, AppError> {
        req.validate()?;

        if req.role == Some(UserRole::Admin) {
            return Err(AppError::BadRequest(
                "Administrators cannot self-register".to_string(),
            ));
        }

        self.hasher.validate_policy(&req.password)?;

        if self
            .users
            .find_by_email(&normalize_email(&req.email))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let user = self.users.create(&new_user(req, password_hash)).await?;

        tracing::info!(user_id = user.id, role = %user.role(), "User registered");

        Ok(user)
    }

    /// 用户登录
    pub async fn login(&self, req: LoginRequest) -> Result<(User, TokenPair), AppError> {
        req.validate()?;

        // 邮箱不存在与密码错误返回相同的 401，且耗时相同
        let Some(user) = self.users.find_by_email(&normalize_email(&req.email)).await? else {
            tracing::warn!("Login failed: unknown email");
            return Err(self.hasher.reject_unknown(&req.password));
        };

        if let Err(e) = self.hasher.verify(&req.password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(e);
        }

        let tokens = self.token_service.generate_token_pair(&user)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok((user, tokens))
    }

    /// 使用刷新令牌换取新的令牌对
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.token_service.validate_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(AppError::Unauthorized)?;

        self.token_service.generate_token_pair(&user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.users.find_by_id(id).await
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        self.users.list(page.clamped()).await
    }

    /// 更新用户（本人或管理员；角色只能由管理员修改）
    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i64,
        req: UpdateUserRequest,
    ) -> Result<User, AppError> {
        req.validate()?;
        actor.require_self_or_admin(id)?;

        if req.role.is_some() && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        let changes = UserChanges::from(req);

        if let Some(email) = &changes.email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::Conflict("Email already registered".to_string()));
                }
            }
        }

        let user = self
            .users
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        tracing::info!(user_id = id, actor_id = actor.user_id, "User updated");

        Ok(user)
    }

    /// 删除用户（本人或管理员）
    pub async fn delete(&self, actor: &AuthContext, id: i64) -> Result<(), AppError> {
        actor.require_self_or_admin(id)?;

        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!(user_id = id, actor_id = actor.user_id, "User deleted");

        Ok(())
    }
}
