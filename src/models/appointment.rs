//! Appointment domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    appliance::{Appliance, ApplianceSummary},
    report::{Report, ReportSummary},
    user::{User, UserSummary},
};

/// Appointment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// pending -> confirmed | cancelled, confirmed -> completed | cancelled
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        if *self == next {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("Unknown appointment status: {}", other)),
        }
    }
}

/// Appointment row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub appliance_id: i64,
    pub client_id: i64,
    pub technician_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Unknown stored statuses are treated as pending
    pub fn status(&self) -> AppointmentStatus {
        self.status.parse().unwrap_or(AppointmentStatus::Pending)
    }
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub appliance_id: i64,
    pub client_id: i64,
    pub technician_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub technician_id: Option<i64>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

/// Create appointment request (client is the caller)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    pub appliance_id: i64,
    pub technician_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub technician_id: Option<i64>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentFilter {
    pub client_id: Option<i64>,
    pub technician_id: Option<i64>,
    pub appliance_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

/// Appointment with every related entity loaded
#[derive(Debug, Clone)]
pub struct AppointmentAggregate {
    pub appointment: Appointment,
    pub appliance: Appliance,
    pub client: User,
    pub technician: Option<User>,
    pub report: Option<Report>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResource {
    pub id: i64,
    pub appliance_id: i64,
    pub client_id: i64,
    pub technician_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Embedded appointment reference
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentSummary {
    pub id: i64,
    pub appliance_id: i64,
    pub client_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// Appointment graph; related entities are summaries and never point back here
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDetail {
    pub id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub appliance: ApplianceSummary,
    pub client: UserSummary,
    pub technician: Option<UserSummary>,
    pub report: Option<ReportSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Completed));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("confirmed".parse::<AppointmentStatus>().unwrap(), Confirmed);
        assert!("done".parse::<AppointmentStatus>().is_err());
    }
}
