//! Resource -> model mappings

use crate::models::{
    appliance::{ApplianceChanges, CreateApplianceRequest, NewAppliance, UpdateApplianceRequest},
    appointment::{
        AppointmentChanges, AppointmentStatus, CreateAppointmentRequest, NewAppointment,
        UpdateAppointmentRequest,
    },
    report::{CreateReportRequest, NewReport, ReportChanges, UpdateReportRequest},
    user::{NewUser, SignUpRequest, UpdateUserRequest, UserChanges, UserRole},
};

/// Emails are stored lowercase and trimmed
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn new_user(req: SignUpRequest, password_hash: String) -> NewUser {
    NewUser {
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        email: normalize_email(&req.email),
        password_hash,
        phone: req.phone,
        address: req.address,
        role: req.role.unwrap_or(UserRole::Client),
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name.map(|s| s.trim().to_string()),
            last_name: req.last_name.map(|s| s.trim().to_string()),
            email: req.email.as_deref().map(normalize_email),
            phone: req.phone,
            address: req.address,
            role: req.role,
        }
    }
}

pub fn new_appliance(req: CreateApplianceRequest, owner_id: i64) -> NewAppliance {
    NewAppliance {
        user_id: owner_id,
        name: req.name.trim().to_string(),
        brand: req.brand.trim().to_string(),
        model: req.model,
        image_url: req.image_url,
    }
}

impl From<UpdateApplianceRequest> for ApplianceChanges {
    fn from(req: UpdateApplianceRequest) -> Self {
        Self {
            name: req.name.map(|s| s.trim().to_string()),
            brand: req.brand.map(|s| s.trim().to_string()),
            model: req.model,
            image_url: req.image_url,
        }
    }
}

pub fn new_appointment(req: CreateAppointmentRequest, client_id: i64) -> NewAppointment {
    NewAppointment {
        appliance_id: req.appliance_id,
        client_id,
        technician_id: req.technician_id,
        scheduled_at: req.scheduled_at,
        status: AppointmentStatus::Pending,
        notes: req.notes,
    }
}

impl From<UpdateAppointmentRequest> for AppointmentChanges {
    fn from(req: UpdateAppointmentRequest) -> Self {
        Self {
            technician_id: req.technician_id,
            scheduled_at: req.scheduled_at,
            status: req.status,
            notes: req.notes,
        }
    }
}

pub fn new_report(req: CreateReportRequest, technician_id: i64) -> NewReport {
    NewReport {
        appointment_id: req.appointment_id,
        technician_id,
        observation: req.observation.trim().to_string(),
        diagnosis: req.diagnosis,
        repair_description: req.repair_description,
        cost: req.cost,
    }
}

impl From<UpdateReportRequest> for ReportChanges {
    fn from(req: UpdateReportRequest) -> Self {
        Self {
            observation: req.observation.map(|s| s.trim().to_string()),
            diagnosis: req.diagnosis,
            repair_description: req.repair_description,
            cost: req.cost,
        }
    }
}
