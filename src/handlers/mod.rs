//! HTTP 处理器模块

pub mod appliances;
pub mod appointments;
pub mod health;
pub mod reports;
pub mod users;
