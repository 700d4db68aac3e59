//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDB 引擎)。数据目录位于 `WORK_DIR/database`。

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;

use crate::utils::AppError;

const NAMESPACE: &str = "municipal";
const DATABASE: &str = "attendance";

/// Open the embedded database under the given data directory
pub async fn init_db(data_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db_path = data_dir.join("database");
    std::fs::create_dir_all(&db_path)
        .map_err(|e| AppError::database(format!("Failed to create database dir: {e}")))?;

    let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path.as_path())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!("Database opened at {}", db_path.display());
    Ok(db)
}

/// In-memory-style database for tests: RocksDB inside a caller-owned tempdir
pub async fn init_test_db(dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(dir)
        .await
        .map_err(|e| AppError::database(format!("Failed to open test database: {e}")))?;
    db.use_ns("test")
        .use_db("test")
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    Ok(db)
}
