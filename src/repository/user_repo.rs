//! User repository (数据库访问层)

use crate::{
    error::AppError,
    models::{user::*, Page},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, page: Page) -> Result<Vec<User>, AppError>;
    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MySqlUserRepository {
    db: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(db: MySqlPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    /// 创建用户
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users
                (first_name, last_name, email, password_hash, phone, address, role,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await
        .map_err(|e| super::map_unique_violation(e, "Email already registered"))?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal_error("Inserted user not found"))
    }

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 列出用户
    async fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }

    /// 更新用户
    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                address = COALESCE(?, address),
                role = COALESCE(?, role),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(changes.role.map(|r| r.as_str()))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| super::map_unique_violation(e, "Email already registered"))?;

        self.find_by_id(id).await
    }

    /// 删除用户
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
