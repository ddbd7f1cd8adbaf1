//! 应用状态与依赖装配

use crate::{
    auth::{PasswordHasher, TokenService},
    config::AppConfig,
    error::AppError,
    repository::{
        ApplianceRepository, AppointmentRepository, MySqlApplianceRepository,
        MySqlAppointmentRepository, MySqlReportRepository, MySqlUserRepository, ReportRepository,
        UserRepository,
    },
    services::{ApplianceService, AppointmentService, ReportService, UserService},
};
use sqlx::MySqlPool;
use std::sync::Arc;

/// 仓储绑定集合
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub appliances: Arc<dyn ApplianceRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl Repositories {
    pub fn mysql(db: &MySqlPool) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(db.clone())),
            appliances: Arc::new(MySqlApplianceRepository::new(db.clone())),
            appointments: Arc::new(MySqlAppointmentRepository::new(db.clone())),
            reports: Arc::new(MySqlReportRepository::new(db.clone())),
        }
    }
}

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: MySqlPool,
    pub token_service: Arc<TokenService>,
    pub user_service: Arc<UserService>,
    pub appliance_service: Arc<ApplianceService>,
    pub appointment_service: Arc<AppointmentService>,
    pub report_service: Arc<ReportService>,
}

impl AppState {
    /// 使用 MySQL 仓储装配
    pub fn new(config: AppConfig, db: MySqlPool) -> Result<Self, AppError> {
        let repositories = Repositories::mysql(&db);
        Self::with_repositories(config, db, repositories)
    }

    pub fn with_repositories(
        config: AppConfig,
        db: MySqlPool,
        repositories: Repositories,
    ) -> Result<Self, AppError> {
        let token_service = Arc::new(TokenService::from_config(&config.security)?);
        let hasher = Arc::new(PasswordHasher::from_config(&config.security)?);

        let Repositories {
            users,
            appliances,
            appointments,
            reports,
        } = repositories;

        let user_service = Arc::new(UserService::new(
            users.clone(),
            token_service.clone(),
            hasher,
        ));
        let appliance_service = Arc::new(ApplianceService::new(appliances.clone()));
        let appointment_service = Arc::new(AppointmentService::new(
            appointments.clone(),
            appliances,
            users.clone(),
            reports.clone(),
        ));
        let report_service = Arc::new(ReportService::new(reports, appointments, users));

        Ok(Self {
            config: Arc::new(config),
            db,
            token_service,
            user_service,
            appliance_service,
            appointment_service,
            report_service,
        })
    }
}
