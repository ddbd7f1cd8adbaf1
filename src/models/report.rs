//! Repair report domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    appointment::{Appointment, AppointmentSummary},
    user::{User, UserSummary},
};

/// Report row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Report {
    pub id: i64,
    pub appointment_id: i64,
    pub technician_id: i64,
    pub observation: String,
    pub diagnosis: Option<String>,
    pub repair_description: Option<String>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub appointment_id: i64,
    pub technician_id: i64,
    pub observation: String,
    pub diagnosis: Option<String>,
    pub repair_description: Option<String>,
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportChanges {
    pub observation: Option<String>,
    pub diagnosis: Option<String>,
    pub repair_description: Option<String>,
    pub cost: Option<f64>,
}

/// Create report request (technician is the caller)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    pub appointment_id: i64,
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 2000))]
    pub observation: String,
    #[validate(length(max = 2000))]
    pub diagnosis: Option<String>,
    #[validate(length(max = 2000))]
    pub repair_description: Option<String>,
    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReportRequest {
    #[validate(custom(function = "crate::models::not_blank"), length(min = 1, max = 2000))]
    pub observation: Option<String>,
    #[validate(length(max = 2000))]
    pub diagnosis: Option<String>,
    #[validate(length(max = 2000))]
    pub repair_description: Option<String>,
    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportFilter {
    pub appointment_id: Option<i64>,
    pub technician_id: Option<i64>,
}

/// Report with its appointment and author loaded
#[derive(Debug, Clone)]
pub struct ReportAggregate {
    pub report: Report,
    pub appointment: Appointment,
    pub technician: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResource {
    pub id: i64,
    pub appointment_id: i64,
    pub technician_id: i64,
    pub observation: String,
    pub diagnosis: Option<String>,
    pub repair_description: Option<String>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Embedded report reference
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    pub id: i64,
    pub technician_id: i64,
    pub observation: String,
    pub diagnosis: Option<String>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Report graph; the appointment is a summary and does not embed this report again
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDetail {
    pub id: i64,
    pub observation: String,
    pub diagnosis: Option<String>,
    pub repair_description: Option<String>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub appointment: AppointmentSummary,
    pub technician: UserSummary,
}
