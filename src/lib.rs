//! RepairNow 维修服务 API 库
//! 提供家电、预约、报告与用户管理的分层 CRUD 服务

pub mod api_doc;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
