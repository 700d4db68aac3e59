//! Attendance Server - 市政户外作业人员考勤审批服务
//!
//! # 架构概述
//!
//! 本服务治理月度考勤记录的完整生命周期：记录按固定全序审批管道
//! 逐级流转，直至成为工资发放依据。
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储（Worker / Area / User /
//!   AttendanceRecord），自然键 upsert
//! - **审批状态机** (`workflow`): 角色门控的逐级审批与驳回返工
//! - **计算引擎** (`payroll`): 确定性计薪天数公式
//! - **辖区解析** (`auth::scope`): actor 授权范围到可见记录集的映射
//! - **审计** (`audit`): 带前后快照与 SHA256 哈希链的 append-only 日志
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! attendance-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # actor 解析、阶段授权表、辖区过滤
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── workflow/      # 审批状态机
//! ├── payroll/       # 计薪天数计算
//! ├── audit/         # 审计日志
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod db;
pub mod payroll;
pub mod utils;
pub mod workflow;

// Re-export 公共类型
pub use auth::{CurrentActor, ScopeResolver};
pub use core::{setup_environment, Config, Server, ServerState};
pub use workflow::{WorkflowCommand, WorkflowManager};

// Re-export unified error types from shared
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ___   __  __                 __
   /   | / /_/ /____  ____  ____/ /
  / /| |/ __/ __/ _ \/ __ \/ __  /
 / ___ / /_/ /_/  __/ / / / /_/ /
/_/  |_\__/\__/\___/_/ /_/\__,_/
    "#
    );
}
