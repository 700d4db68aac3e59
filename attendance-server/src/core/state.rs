//! Server state
//!
//! ServerState 持有所有服务的共享引用，使用 Arc 实现浅拷贝。

use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;
use tokio::sync::Mutex;

use crate::audit::{AuditLogRequest, AuditService, AuditStorage, AuditWorker};
use crate::core::Config;
use crate::db;

/// Server state: shared handles for config, database and audit service
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 审计日志服务
    pub audit: Arc<AuditService>,
    /// 审计 worker 消费端，由 start_background_tasks 取走
    audit_rx: Arc<Mutex<Option<tokio::sync::mpsc::Receiver<AuditLogRequest>>>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 打开嵌入式数据库 (WORK_DIR/database)
    /// 2. 创建审计服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic — 没有数据库就没有可运行的服务
    pub async fn initialize(config: &Config) -> Self {
        let db = db::init_db(std::path::Path::new(&config.work_dir))
            .await
            .expect("Failed to initialize database");

        let (audit, audit_rx) = AuditService::new(db.clone(), config.audit_buffer_size);

        Self {
            config: config.clone(),
            db,
            audit,
            audit_rx: Arc::new(Mutex::new(Some(audit_rx))),
        }
    }

    /// Build a state over an existing database handle (tests)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let (audit, audit_rx) = AuditService::new(db.clone(), config.audit_buffer_size);
        Self {
            config,
            db,
            audit,
            audit_rx: Arc::new(Mutex::new(Some(audit_rx))),
        }
    }

    /// 启动后台任务（审计 worker）。重复调用是空操作。
    pub async fn start_background_tasks(&self) {
        if let Some(rx) = self.audit_rx.lock().await.take() {
            let worker = AuditWorker::new(AuditStorage::new(self.db.clone()));
            tokio::spawn(worker.run(rx));
        }
    }
}
