//! Appliance domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Appliance row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Appliance {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub brand: String,
    pub model: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAppliance {
    pub user_id: i64,
    pub name: String,
    pub brand: String,
    pub model: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApplianceChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub image_url: Option<String>,
}

/// Create appliance request (owner is the caller)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApplianceRequest {
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    #[validate(url, length(max = 512))]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateApplianceRequest {
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    #[validate(url, length(max = 512))]
    pub image_url: Option<String>,
}

/// List filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplianceFilter {
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplianceResource {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub brand: String,
    pub model: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Embedded appliance reference
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplianceSummary {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub model: Option<String>,
}
