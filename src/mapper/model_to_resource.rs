//! Model -> resource mappings

use crate::models::{
    appliance::{Appliance, ApplianceResource, ApplianceSummary},
    appointment::{
        Appointment, AppointmentAggregate, AppointmentDetail, AppointmentResource,
        AppointmentSummary,
    },
    report::{Report, ReportAggregate, ReportDetail, ReportResource, ReportSummary},
    user::{User, UserResource, UserSummary},
};

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        let role = user.role();
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            email: user.email.clone(),
            role: user.role(),
        }
    }
}

impl From<Appliance> for ApplianceResource {
    fn from(appliance: Appliance) -> Self {
        Self {
            id: appliance.id,
            user_id: appliance.user_id,
            name: appliance.name,
            brand: appliance.brand,
            model: appliance.model,
            image_url: appliance.image_url,
            created_at: appliance.created_at,
            updated_at: appliance.updated_at,
        }
    }
}

impl From<&Appliance> for ApplianceSummary {
    fn from(appliance: &Appliance) -> Self {
        Self {
            id: appliance.id,
            name: appliance.name.clone(),
            brand: appliance.brand.clone(),
            model: appliance.model.clone(),
        }
    }
}

impl From<Appointment> for AppointmentResource {
    fn from(appointment: Appointment) -> Self {
        let status = appointment.status();
        Self {
            id: appointment.id,
            appliance_id: appointment.appliance_id,
            client_id: appointment.client_id,
            technician_id: appointment.technician_id,
            scheduled_at: appointment.scheduled_at,
            status,
            notes: appointment.notes,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl From<&Appointment> for AppointmentSummary {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            appliance_id: appointment.appliance_id,
            client_id: appointment.client_id,
            scheduled_at: appointment.scheduled_at,
            status: appointment.status(),
        }
    }
}

impl From<AppointmentAggregate> for AppointmentDetail {
    fn from(aggregate: AppointmentAggregate) -> Self {
        let AppointmentAggregate {
            appointment,
            appliance,
            client,
            technician,
            report,
        } = aggregate;

        Self {
            id: appointment.id,
            scheduled_at: appointment.scheduled_at,
            status: appointment.status(),
            notes: appointment.notes,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
            appliance: ApplianceSummary::from(&appliance),
            client: UserSummary::from(&client),
            technician: technician.as_ref().map(UserSummary::from),
            report: report.as_ref().map(ReportSummary::from),
        }
    }
}

impl From<Report> for ReportResource {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            appointment_id: report.appointment_id,
            technician_id: report.technician_id,
            observation: report.observation,
            diagnosis: report.diagnosis,
            repair_description: report.repair_description,
            cost: report.cost,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            technician_id: report.technician_id,
            observation: report.observation.clone(),
            diagnosis: report.diagnosis.clone(),
            cost: report.cost,
            created_at: report.created_at,
        }
    }
}

impl From<ReportAggregate> for ReportDetail {
    fn from(aggregate: ReportAggregate) -> Self {
        let ReportAggregate {
            report,
            appointment,
            technician,
        } = aggregate;

        Self {
            id: report.id,
            observation: report.observation,
            diagnosis: report.diagnosis,
            repair_description: report.repair_description,
            cost: report.cost,
            created_at: report.created_at,
            updated_at: report.updated_at,
            appointment: AppointmentSummary::from(&appointment),
            technician: UserSummary::from(&technician),
        }
    }
}
