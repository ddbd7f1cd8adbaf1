//! Appliance repository (家电数据访问)

use crate::{
    error::AppError,
    models::{appliance::*, Page},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, MySqlPool, QueryBuilder};

#[async_trait]
pub trait ApplianceRepository: Send + Sync {
    async fn create(&self, appliance: &NewAppliance) -> Result<Appliance, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Appliance>, AppError>;
    async fn list(&self, filter: &ApplianceFilter, page: Page) -> Result<Vec<Appliance>, AppError>;
    async fn update(
        &self,
        id: i64,
        changes: &ApplianceChanges,
    ) -> Result<Option<Appliance>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MySqlApplianceRepository {
    db: MySqlPool,
}

impl MySqlApplianceRepository {
    pub fn new(db: MySqlPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplianceRepository for MySqlApplianceRepository {
    async fn create(&self, appliance: &NewAppliance) -> Result<Appliance, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO appliances (user_id, name, brand, model, image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(appliance.user_id)
        .bind(&appliance.name)
        .bind(&appliance.brand)
        .bind(&appliance.model)
        .bind(&appliance.image_url)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::internal_error("Inserted appliance not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appliance>, AppError> {
        let appliance = sqlx::query_as::<_, Appliance>("SELECT * FROM appliances WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(appliance)
    }

    async fn list(&self, filter: &ApplianceFilter, page: Page) -> Result<Vec<Appliance>, AppError> {
        let mut query = QueryBuilder::<MySql>::new("SELECT * FROM appliances WHERE 1=1");

        if let Some(user_id) = filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id);
        }

        query
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let appliances = query
            .build_query_as::<Appliance>()
            .fetch_all(&self.db)
            .await?;

        Ok(appliances)
    }

    async fn update(
        &self,
        id: i64,
        changes: &ApplianceChanges,
    ) -> Result<Option<Appliance>, AppError> {
        sqlx::query(
            r#"
            UPDATE appliances
            SET
                name = COALESCE(?, name),
                brand = COALESCE(?, brand),
                model = COALESCE(?, model),
                image_url = COALESCE(?, image_url),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.brand)
        .bind(&changes.model)
        .bind(&changes.image_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.db)
        .await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM appliances WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
