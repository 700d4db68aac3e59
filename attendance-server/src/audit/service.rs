//! 审计日志服务
//!
//! `AuditService` 是审计日志的入口：
//! - 日志写入（通过 mpsc 通道异步投递给 [`super::AuditWorker`]）
//! - 日志查询与链验证（直接读取 storage）
//!
//! 写入永不阻塞主变更：通道满或关闭时 `log()` 返回 `false`（降级），
//! 调用方把降级标记附在成功结果旁上报。

use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;
use tokio::sync::mpsc;

use super::diff::{diff_snapshots, excluded_fields};
use super::storage::{AuditStorage, AuditStorageResult};
use shared::models::{AuditAction, AuditChainVerification, AuditEntry, AuditQuery, FieldChange};

/// 发送到 AuditWorker 的日志请求
#[derive(Debug)]
pub struct AuditLogRequest {
    pub table_name: String,
    pub record_id: String,
    pub action: AuditAction,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub changes: Option<Vec<FieldChange>>,
    pub changed_by: Option<String>,
}

/// 审计日志服务
pub struct AuditService {
    storage: AuditStorage,
    tx: mpsc::Sender<AuditLogRequest>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    /// 创建审计服务，返回 worker 消费端
    pub fn new(
        db: Surreal<Db>,
        buffer_size: usize,
    ) -> (Arc<Self>, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        let storage = AuditStorage::new(db);
        let service = Arc::new(Self { storage, tx });
        (service, rx)
    }

    pub fn storage(&self) -> &AuditStorage {
        &self.storage
    }

    /// Enqueue an audit entry for a store mutation.
    ///
    /// Returns `false` when the entry could not be enqueued; the caller's
    /// mutation still stands and the degradation is reported alongside it.
    pub fn log(
        &self,
        table_name: &str,
        record_id: &str,
        action: AuditAction,
        old_data: Option<serde_json::Value>,
        new_data: Option<serde_json::Value>,
        changed_by: Option<String>,
    ) -> bool {
        let changes = match (action, &old_data, &new_data) {
            (AuditAction::Update, Some(old), Some(new)) => {
                Some(diff_snapshots(old, new, excluded_fields(table_name)))
            }
            _ => None,
        };

        let request = AuditLogRequest {
            table_name: table_name.to_string(),
            record_id: record_id.to_string(),
            action,
            old_data,
            new_data,
            changes,
            changed_by,
        };

        match self.tx.try_send(request) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    table_name,
                    record_id,
                    "audit write degraded, entry dropped: {e}"
                );
                false
            }
        }
    }

    /// 查询审计日志
    pub async fn query(&self, q: &AuditQuery) -> AuditStorageResult<(Vec<AuditEntry>, u64)> {
        self.storage.query(q).await
    }

    /// 验证哈希链
    pub async fn verify_chain(&self) -> AuditStorageResult<AuditChainVerification> {
        self.storage.verify_chain().await
    }
}
