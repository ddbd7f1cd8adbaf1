//! 维修报告服务

use crate::{
    auth::AuthContext,
    error::AppError,
    mapper::resource_to_model::new_report,
    models::{report::*, user::UserRole, Page},
    repository::{AppointmentRepository, ReportRepository, UserRepository},
};
use std::sync::Arc;
use validator::Validate;

pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReportService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            reports,
            appointments,
            users,
        }
    }

    /// 技师为预约提交报告，每个预约最多一份
    pub async fn create(
        &self,
        actor: &AuthContext,
        req: CreateReportRequest,
    ) -> Result<Report, AppError> {
        actor.require_any_role(&[UserRole::Technician, UserRole::Admin])?;
        req.validate()?;

        if self
            .appointments
            .find_by_id(req.appointment_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("Appointment not found"));
        }

        if self
            .reports
            .find_by_appointment(req.appointment_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Appointment already has a report".to_string()));
        }

        let report = self.reports.create(&new_report(req, actor.user_id)).await?;

        tracing::info!(
            report_id = report.id,
            appointment_id = report.appointment_id,
            technician_id = actor.user_id,
            "Report created"
        );

        Ok(report)
    }

    pub async fn get(&self, id: i64) -> Result<Report, AppError> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))
    }

    pub async fn get_detail(&self, id: i64) -> Result<ReportAggregate, AppError> {
        let report = self.get(id).await?;

        let appointment = self
            .appointments
            .find_by_id(report.appointment_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Report references a missing appointment"))?;

        let technician = self
            .users
            .find_by_id(report.technician_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Report references a missing technician"))?;

        Ok(ReportAggregate {
            report,
            appointment,
            technician,
        })
    }

    pub async fn list(&self, filter: &ReportFilter, page: Page) -> Result<Vec<Report>, AppError> {
        self.reports.list(filter, page.clamped()).await
    }

    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i64,
        req: UpdateReportRequest,
    ) -> Result<Report, AppError> {
        req.validate()?;

        let existing = self.get(id).await?;
        actor.require_self_or_admin(existing.technician_id)?;

        self.reports
            .update(id, &ReportChanges::from(req))
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))
    }

    pub async fn delete(&self, actor: &AuthContext, id: i64) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        actor.require_self_or_admin(existing.technician_id)?;

        if !self.reports.delete(id).await? {
            return Err(AppError::not_found("Report not found"));
        }

        tracing::info!(report_id = id, actor_id = actor.user_id, "Report deleted");

        Ok(())
    }
}
