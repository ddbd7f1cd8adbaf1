//! 电器服务

use crate::{
    auth::AuthContext,
    error::AppError,
    mapper::resource_to_model::new_appliance,
    models::{appliance::*, Page},
    repository::ApplianceRepository,
};
use std::sync::Arc;
use validator::Validate;

pub struct ApplianceService {
    appliances: Arc<dyn ApplianceRepository>,
}

impl ApplianceService {
    pub fn new(appliances: Arc<dyn ApplianceRepository>) -> Self {
        Self { appliances }
    }

    /// 为调用者登记电器
    pub async fn create(
        &self,
        actor: &AuthContext,
        req: CreateApplianceRequest,
    ) -> Result<Appliance, AppError> {
        req.validate()?;

        let appliance = self
            .appliances
            .create(&new_appliance(req, actor.user_id))
            .await?;

        tracing::info!(appliance_id = appliance.id, owner_id = actor.user_id, "Appliance created");

        Ok(appliance)
    }

    pub async fn get(&self, id: i64) -> Result<Appliance, AppError> {
        self.appliances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Appliance not found"))
    }

    pub async fn list(
        &self,
        filter: &ApplianceFilter,
        page: Page,
    ) -> Result<Vec<Appliance>, AppError> {
        self.appliances.list(filter, page.clamped()).await
    }

    pub async fn update(
        &self,
        actor: &AuthContext,
        id: i64,
        req: UpdateApplianceRequest,
    ) -> Result<Appliance, AppError> {
        req.validate()?;

        let existing = self.get(id).await?;
        actor.require_self_or_admin(existing.user_id)?;

        self.appliances
            .update(id, &ApplianceChanges::from(req))
            .await?
            .ok_or_else(|| AppError::not_found("Appliance not found"))
    }

    pub async fn delete(&self, actor: &AuthContext, id: i64) -> Result<(), AppError> {
        let existing = self.get(id).await?;
        actor.require_self_or_admin(existing.user_id)?;

        if !self.appliances.delete(id).await? {
            return Err(AppError::not_found("Appliance not found"));
        }

        tracing::info!(appliance_id = id, actor_id = actor.user_id, "Appliance deleted");

        Ok(())
    }
}
