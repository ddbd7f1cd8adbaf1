//! Business logic services layer

pub mod appliance_service;
pub mod appointment_service;
pub mod report_service;
pub mod user_service;

pub use appliance_service::ApplianceService;
pub use appointment_service::AppointmentService;
pub use report_service::ReportService;
pub use user_service::UserService;
