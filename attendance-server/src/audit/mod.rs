//! 审计日志模块
//!
//! # 架构
//!
//! ```text
//! 存储层 create/update/delete
//!   └─ AuditService::log() → mpsc → AuditWorker → SurrealDB (audit_log 表)
//!
//! SHA256 哈希链: genesis → entry₁ → entry₂ → ... → entryₙ
//! ```
//!
//! # 保证
//!
//! - **Append-only**: 无删除/更新接口
//! - **SHA256 哈希链**: 每条记录包含前一条的哈希，可随时验证完整性
//! - **不阻塞主流程**: 通道满或关闭时主变更照常成功，降级标记上报
//!   （可用性优先于审计完整性，这是明确的设计取舍）

pub mod diff;
pub mod service;
pub mod storage;
pub mod worker;

pub use diff::diff_snapshots;
pub use service::{AuditLogRequest, AuditService};
pub use storage::{AuditStorage, AuditStorageError};
pub use worker::AuditWorker;
