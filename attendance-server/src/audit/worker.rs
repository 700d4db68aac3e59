//! 审计日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditLogRequest，写入 SurrealDB。
//! 通道关闭时自动退出。

use super::service::AuditLogRequest;
use super::storage::AuditStorage;

/// 审计日志后台 Worker
pub struct AuditWorker {
    storage: AuditStorage,
}

impl AuditWorker {
    pub fn new(storage: AuditStorage) -> Self {
        Self { storage }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<AuditLogRequest>) {
        tracing::info!("Audit log worker started");

        while let Some(req) = rx.recv().await {
            match self
                .storage
                .append(
                    req.table_name,
                    req.record_id,
                    req.action,
                    req.old_data,
                    req.new_data,
                    req.changes,
                    req.changed_by,
                )
                .await
            {
                Ok(entry) => {
                    tracing::debug!(
                        sequence = entry.sequence,
                        action = %entry.action,
                        table = %entry.table_name,
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    // Best-effort delivery: the primary mutation already
                    // succeeded and is never rolled back here.
                    tracing::error!("Failed to write audit entry: {:?}", e);
                }
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }
}
