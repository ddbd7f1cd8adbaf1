//! 预约服务：预约创建、状态流转与详情聚合

use crate::{
    auth::AuthContext,
    error::AppError,
    mapper::resource_to_model::new_appointment,
    models::{appointment::*, user::UserRole, Page},
    repository::{ApplianceRepository, AppointmentRepository, ReportRepository, UserRepository},
};
use std::sync::Arc;
use validator::Validate;

pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    appliances: Arc<dyn ApplianceRepository>,
    users: Arc<dyn UserRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        appliances: Arc<dyn ApplianceRepository>,
        users: Arc<dyn UserRepository>,
        reports: Arc<dyn ReportRepository>,
    ) -> Self {
        Self {
            appointments,
            appliances,
            users,
            reports,
        }
    }

    /// 客户为自己的电器预约维修
    pub async fn create(
        &self,
        actor: &AuthContext,
        req: CreateAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        req.validate()?;

        let appliance = self
            .appliances
            .find_by_id(req.appliance_id)
            .await?
            .ok_or_else(|| AppError::not_found("Appliance not found"))?;
        actor.require_self_or_admin(appliance.user_id)?;

        if let Some(technician_id) = req.technician_id {
            self.ensure_technician(technician_id).await?;
        }

        // 预约归属于电器所有者，管理员代订时亦然
        let appointment = self
            .appointments
            .create(&new_appointment(req, appliance.user_id))
            .await?;

        tracing::info!(
            appointment_id = appointment.id,
            client_id = appointment.client_id,
            "Appointment created"
        );

        Ok(appointment)
    }

    pub async fn get(&self, id: i64) -> Result<Appointment, AppError> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Appointment not found"))
    }

    /// 加载预约及其关联实体
    pub async fn get_detail(&self, id: i64) -> Result<AppointmentAggregate, AppError> {
        let appointment = self.get(id).await?;

        let appliance = self
            .appliances
            .find_by_id(appointment.appliance_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Appointment references a missing appliance"))?;

        let client = self
            .users
            .find_by_id(appointment.client_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Appointment references a missing client"))?;

        let technician = match appointment.technician_id {
            Some(technician_id) => self.users.find_by_id(technician_id).await?,
            None => None,
        };

        let report = self.reports.find_by_appointment(appointment.id).await?;

        Ok(AppointmentAggregate {
            appointment,
            appliance,
            client,
            technician,
            report,
        })
    }

    pub async fn list(
        &self,
        filter: &AppointmentFilter,
        page: Page,
    ) -> Result<Vec<Appointment>, AppError> {
        self.appointments.list(filter, page.clamped()).await
    }

    /// 更新预约（客户、指派的技师或管理员）
    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i64,
        req: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        req.validate()?;

        let existing = self.get(id).await?;
        let is_assigned_technician = existing.technician_id == Some(actor.user_id);
        if actor.user_id != existing.client_id && !is_assigned_technician && !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        if let Some(next) = req.status {
            let current = existing.status();
            if !current.can_transition_to(next) {
                return Err(AppError::BadRequest(format!(
                    "Cannot change appointment status from {} to {}",
                    current, next
                )));
            }
        } else if existing.status().is_terminal() {
            return Err(AppError::BadRequest(format!(
                "Appointment is {} and can no longer change",
                existing.status()
            )));
        }

        if let Some(technician_id) = req.technician_id {
            if Some(technician_id) != existing.technician_id {
                self.ensure_technician(technician_id).await?;
            }
        }

        let appointment = self
            .appointments
            .update(id, &AppointmentChanges::from(req))
            .await?
            .ok_or_else(|| AppError::not_found("Appointment not found"))?;

        tracing::info!(
            appointment_id = id,
            actor_id = actor.user_id,
            status = %appointment.status(),
            "Appointment updated"
        );

        Ok(appointment)
    }

    /// 删除预约（客户或管理员）
    pub async fn delete(&self, actor: &AuthContext, id: i64) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        actor.require_self_or_admin(existing.client_id)?;

        if !self.appointments.delete(id).await? {
            return Err(AppError::not_found("Appointment not found"));
        }

        tracing::info!(appointment_id = id, actor_id = actor.user_id, "Appointment deleted");

        Ok(())
    }

    async fn ensure_technician(&self, user_id: i64) -> Result<(), AppError> {
        match self.users.find_by_id(user_id).await? {
            Some(user) if user.role() == UserRole::Technician => Ok(()),
            _ => Err(AppError::BadRequest(format!(
                "User {} is not a technician",
                user_id
            ))),
        }
    }
}
