//! OpenAPI 文档与 Swagger UI

use crate::{
    auth::TokenPair,
    error::{ErrorDetail, ErrorResponse},
    handlers::{
        appliances, appointments,
        health::{self, HealthCheck, HealthResponse, ReadinessResponse},
        reports, users,
    },
    models::{appliance::*, appointment::*, report::*, user::*},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

pub const SWAGGER_UI_PATH: &str = "/swagger";
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "RepairNow API", description = "Appliance repair scheduling service"),
    paths(
        health::health_check,
        health::readiness_check,
        users::sign_up,
        users::login,
        users::refresh_token,
        users::get_current_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        appliances::list_appliances,
        appliances::create_appliance,
        appliances::get_appliance,
        appliances::update_appliance,
        appliances::delete_appliance,
        appointments::list_appointments,
        appointments::create_appointment,
        appointments::get_appointment,
        appointments::update_appointment,
        appointments::delete_appointment,
        reports::list_reports,
        reports::create_report,
        reports::get_report,
        reports::update_report,
        reports::delete_report,
    ),
    components(schemas(
        ErrorResponse,
        ErrorDetail,
        HealthResponse,
        ReadinessResponse,
        HealthCheck,
        TokenPair,
        UserRole,
        SignUpRequest,
        LoginRequest,
        LoginResponse,
        RefreshTokenRequest,
        UpdateUserRequest,
        UserResource,
        UserSummary,
        CreateApplianceRequest,
        UpdateApplianceRequest,
        ApplianceResource,
        ApplianceSummary,
        AppointmentStatus,
        CreateAppointmentRequest,
        UpdateAppointmentRequest,
        AppointmentResource,
        AppointmentSummary,
        AppointmentDetail,
        CreateReportRequest,
        UpdateReportRequest,
        ReportResource,
        ReportSummary,
        ReportDetail,
    )),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "users", description = "Registration, login and user management"),
        (name = "appliances", description = "Customer appliances"),
        (name = "appointments", description = "Repair appointments"),
        (name = "reports", description = "Technician repair reports"),
    ),
    modifiers(&SecurityAddon),
    security(("bearerAuth" = []))
)]
pub struct ApiDoc;

/// 注册 `bearerAuth`（HTTP bearer，JWT）安全方案
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("JWT Authorization header using the Bearer scheme"))
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
