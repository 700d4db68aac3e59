//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`records`] - 考勤记录与审批流转接口
//! - [`import`] - 批量导入接口
//! - [`workers`] - 工人管理接口
//! - [`areas`] - 辖区管理接口
//! - [`users`] - 用户管理接口
//! - [`audit_log`] - 审计日志接口

pub mod convert;

pub mod areas;
pub mod audit_log;
pub mod health;
pub mod import;
pub mod records;
pub mod users;
pub mod workers;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppError, AppResult};
