//! Report repository (维修报告数据访问)

use crate::{
    error::AppError,
    models::{report::*, Page},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, MySqlPool, QueryBuilder};

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: &NewReport) -> Result<Report, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, AppError>;
    async fn find_by_appointment(&self, appointment_id: i64) -> Result<Option<Report>, AppError>;
    async fn list(&self, filter: &ReportFilter, page: Page) -> Result<Vec<Report>, AppError>;
    async fn update(&self, id: i64, changes: &ReportChanges) -> Result<Option<Report>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MySqlReportRepository {
    db: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(db: MySqlPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn create(&self, report: &NewReport) -> Result<Report, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO reports
                (appointment_id, technician_id, observation, diagnosis, repair_description, cost,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(report.appointment_id)
        .bind(report.technician_id)
        .bind(&report.observation)
        .bind(&report.diagnosis)
        .bind(&report.repair_description)
        .bind(report.cost)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await
        .map_err(|e| super::map_unique_violation(e, "Appointment already has a report"))?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::internal_error("Inserted report not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>, AppError> {
        let report = sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(report)
    }

    async fn find_by_appointment(&self, appointment_id: i64) -> Result<Option<Report>, AppError> {
        let report = sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE appointment_id = ?")
            .bind(appointment_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(report)
    }

    async fn list(&self, filter: &ReportFilter, page: Page) -> Result<Vec<Report>, AppError> {
        let mut query = QueryBuilder::<MySql>::new("SELECT * FROM reports WHERE 1=1");

        if let Some(appointment_id) = filter.appointment_id {
            query.push(" AND appointment_id = ").push_bind(appointment_id);
        }
        if let Some(technician_id) = filter.technician_id {
            query.push(" AND technician_id = ").push_bind(technician_id);
        }

        query
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let reports = query.build_query_as::<Report>().fetch_all(&self.db).await?;

        Ok(reports)
    }

    async fn update(&self, id: i64, changes: &ReportChanges) -> Result<Option<Report>, AppError> {
        sqlx::query(
            r#"
            UPDATE reports
            SET
                observation = COALESCE(?, observation),
                diagnosis = COALESCE(?, diagnosis),
                repair_description = COALESCE(?, repair_description),
                cost = COALESCE(?, cost),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.observation)
        .bind(&changes.diagnosis)
        .bind(&changes.repair_description)
        .bind(changes.cost)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.db)
        .await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
