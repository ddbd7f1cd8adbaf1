//! 数据库连接池与建表管理
//! 提供 MySQL 连接池、服务器版本检查、按需建表和健康检查

use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::{migrate::MigrateDatabase, mysql::MySqlPoolOptions, MySql, MySqlPool};
use std::{fmt, time::Duration};

/// 建表语句，按外键依赖顺序执行
const SCHEMA: [(&str, &str); 4] = [
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT NOT NULL AUTO_INCREMENT,
            first_name VARCHAR(100) NOT NULL,
            last_name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NULL,
            address VARCHAR(255) NULL,
            role VARCHAR(20) NOT NULL DEFAULT 'client',
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            UNIQUE KEY uq_users_email (email)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
        "#,
    ),
    (
        "appliances",
        r#"
        CREATE TABLE IF NOT EXISTS appliances (
            id BIGINT NOT NULL AUTO_INCREMENT,
            user_id BIGINT NOT NULL,
            name VARCHAR(100) NOT NULL,
            brand VARCHAR(100) NOT NULL,
            model VARCHAR(100) NULL,
            image_url VARCHAR(512) NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            KEY ix_appliances_user_id (user_id),
            CONSTRAINT fk_appliances_user FOREIGN KEY (user_id)
                REFERENCES users (id) ON DELETE CASCADE
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGINT NOT NULL AUTO_INCREMENT,
            appliance_id BIGINT NOT NULL,
            client_id BIGINT NOT NULL,
            technician_id BIGINT NULL,
            scheduled_at DATETIME(6) NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            notes VARCHAR(1000) NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            KEY ix_appointments_client_id (client_id),
            KEY ix_appointments_technician_id (technician_id),
            CONSTRAINT fk_appointments_appliance FOREIGN KEY (appliance_id)
                REFERENCES appliances (id) ON DELETE CASCADE,
            CONSTRAINT fk_appointments_client FOREIGN KEY (client_id)
                REFERENCES users (id) ON DELETE CASCADE,
            CONSTRAINT fk_appointments_technician FOREIGN KEY (technician_id)
                REFERENCES users (id) ON DELETE SET NULL
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
        "#,
    ),
    (
        "reports",
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            id BIGINT NOT NULL AUTO_INCREMENT,
            appointment_id BIGINT NOT NULL,
            technician_id BIGINT NOT NULL,
            observation VARCHAR(2000) NOT NULL,
            diagnosis VARCHAR(2000) NULL,
            repair_description VARCHAR(2000) NULL,
            cost DOUBLE NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            UNIQUE KEY uq_reports_appointment_id (appointment_id),
            CONSTRAINT fk_reports_appointment FOREIGN KEY (appointment_id)
                REFERENCES appointments (id) ON DELETE CASCADE,
            CONSTRAINT fk_reports_technician FOREIGN KEY (technician_id)
                REFERENCES users (id) ON DELETE CASCADE
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
        "#,
    ),
];

/// 确保连接串指向的数据库存在，不存在则创建
///
/// 返回 `true` 表示本次新建了数据库。
pub async fn ensure_database(config: &DatabaseConfig) -> Result<bool, DbError> {
    let db_url = config.url.expose_secret();

    let exists = MySql::database_exists(db_url)
        .await
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
    if exists {
        return Ok(false);
    }

    MySql::create_database(db_url).await.map_err(|e| {
        tracing::error!("Failed to create database: {}", e);
        DbError::DatabaseCreationFailed(e.to_string())
    })?;

    tracing::info!("Database created");
    Ok(true)
}

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DbError> {
    let db_url = config.url.expose_secret();

    tracing::debug!("Creating database connection pool...");

    let pool = pool_options(config)
        .connect(db_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database pool: {}", e);
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool created successfully"
    );

    Ok(pool)
}

/// 创建延迟连接的连接池（首次查询时才建立连接）
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<MySqlPool, DbError> {
    pool_options(config)
        .connect_lazy(config.url.expose_secret())
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// 确保所有表存在（只建不迁移）
pub async fn ensure_created(pool: &MySqlPool) -> Result<(), DbError> {
    tracing::info!("Ensuring database schema exists...");

    for (table, ddl) in SCHEMA {
        sqlx::query(ddl).execute(pool).await.map_err(|e| {
            tracing::error!(table, "Schema creation failed: {}", e);
            DbError::SchemaCreationFailed(format!("{}: {}", table, e))
        })?;
        tracing::debug!(table, "Table ready");
    }

    tracing::info!("Database schema ready");
    Ok(())
}

/// 检查服务器版本不低于配置的固定版本
pub async fn check_server_version(
    pool: &MySqlPool,
    pinned: &ServerVersion,
) -> Result<ServerVersion, DbError> {
    let raw: String = sqlx::query_scalar("SELECT VERSION()")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

    let actual = ServerVersion::parse(&raw)
        .ok_or_else(|| DbError::UnsupportedVersion(raw.clone()))?;

    if actual < *pinned {
        tracing::warn!(
            actual = %actual,
            pinned = %pinned,
            "MySQL server is older than the pinned server version"
        );
    } else {
        tracing::info!(actual = %actual, pinned = %pinned, "MySQL server version checked");
    }

    Ok(actual)
}

/// 数据库健康检查
pub async fn health_check(pool: &MySqlPool) -> HealthStatus {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => {
            tracing::debug!("Database health check: OK");
            HealthStatus::Healthy
        }
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            HealthStatus::Unhealthy(e.to_string())
        }
    }
}

/// 记录数据库连接池指标
pub fn record_pool_metrics(pool: &MySqlPool) {
    metrics::gauge!("db.pool.size").set(pool.size() as f64);
    metrics::gauge!("db.pool.idle").set(pool.num_idle() as f64);
}

/// MySQL 服务器版本（major.minor.patch）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// 解析 "5.7.9"、"5.7.44-log"、"8.0.36-0ubuntu0.22.04.1" 之类的版本串
    pub fn parse(raw: &str) -> Option<Self> {
        let core = raw.trim().split(|c: char| c == '-' || c == ' ').next()?;
        let mut parts = core.split('.');

        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };

        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// 数据库错误类型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database creation failed: {0}")]
    DatabaseCreationFailed(String),

    #[error("Schema creation failed: {0}")]
    SchemaCreationFailed(String),

    #[error("Unsupported server version: {0}")]
    UnsupportedVersion(String),
}

/// 健康状态
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}
