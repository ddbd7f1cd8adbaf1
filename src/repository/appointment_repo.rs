//! Appointment repository (预约数据访问)

use crate::{
    error::AppError,
    models::{appointment::*, Page},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, MySqlPool, QueryBuilder};

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError>;
    async fn list(
        &self,
        filter: &AppointmentFilter,
        page: Page,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn update(
        &self,
        id: i64,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

pub struct MySqlAppointmentRepository {
    db: MySqlPool,
}

impl MySqlAppointmentRepository {
    pub fn new(db: MySqlPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentRepository for MySqlAppointmentRepository {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO appointments
                (appliance_id, client_id, technician_id, scheduled_at, status, notes,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(appointment.appliance_id)
        .bind(appointment.client_id)
        .bind(appointment.technician_id)
        .bind(appointment.scheduled_at)
        .bind(appointment.status.as_str())
        .bind(&appointment.notes)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await?;

        self.find_by_id(result.last_insert_id() as i64)
            .await?
            .ok_or_else(|| AppError::internal_error("Inserted appointment not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError> {
        let appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(appointment)
    }

    async fn list(
        &self,
        filter: &AppointmentFilter,
        page: Page,
    ) -> Result<Vec<Appointment>, AppError> {
        let mut query = QueryBuilder::<MySql>::new("SELECT * FROM appointments WHERE 1=1");

        if let Some(client_id) = filter.client_id {
            query.push(" AND client_id = ").push_bind(client_id);
        }
        if let Some(technician_id) = filter.technician_id {
            query.push(" AND technician_id = ").push_bind(technician_id);
        }
        if let Some(appliance_id) = filter.appliance_id {
            query.push(" AND appliance_id = ").push_bind(appliance_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        query
            .push(" ORDER BY scheduled_at, id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let appointments = query
            .build_query_as::<Appointment>()
            .fetch_all(&self.db)
            .await?;

        Ok(appointments)
    }

    async fn update(
        &self,
        id: i64,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, AppError> {
        sqlx::query(
            r#"
            UPDATE appointments
            SET
                technician_id = COALESCE(?, technician_id),
                scheduled_at = COALESCE(?, scheduled_at),
                status = COALESCE(?, status),
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.technician_id)
        .bind(changes.scheduled_at)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(&changes.notes)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.db)
        .await?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
