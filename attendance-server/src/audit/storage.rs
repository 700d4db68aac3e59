//! 审计日志 SurrealDB 存储层
//!
//! Append-only 设计，没有任何删除/更新接口。
//! SHA256 哈希链确保防篡改。

use std::sync::Arc;

use sha2::{Digest, Sha256};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;
use thiserror::Error;

use shared::models::{
    AuditAction, AuditChainBreak, AuditChainVerification, AuditEntry, AuditQuery, FieldChange,
};

/// 存储错误
#[derive(Debug, Error)]
pub enum AuditStorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<surrealdb::Error> for AuditStorageError {
    fn from(err: surrealdb::Error) -> Self {
        AuditStorageError::Database(err.to_string())
    }
}

pub type AuditStorageResult<T> = Result<T, AuditStorageError>;

impl From<AuditStorageError> for shared::error::AppError {
    fn from(err: AuditStorageError) -> Self {
        shared::error::AppError::internal(err.to_string())
    }
}

/// 插入用结构（不含 SurrealDB id）
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct AuditRow {
    sequence: u64,
    table_name: String,
    record_id: String,
    action: AuditAction,
    old_data: Option<serde_json::Value>,
    new_data: Option<serde_json::Value>,
    changes: Option<Vec<FieldChange>>,
    changed_by: Option<String>,
    changed_at: i64,
    prev_hash: String,
    curr_hash: String,
}

impl From<AuditRow> for AuditEntry {
    fn from(r: AuditRow) -> Self {
        AuditEntry {
            sequence: r.sequence,
            table_name: r.table_name,
            record_id: r.record_id,
            action: r.action,
            old_data: r.old_data,
            new_data: r.new_data,
            changes: r.changes,
            changed_by: r.changed_by,
            changed_at: r.changed_at,
            prev_hash: r.prev_hash,
            curr_hash: r.curr_hash,
        }
    }
}

/// 查询最后一条记录的序列号和哈希
#[derive(Debug, serde::Deserialize)]
struct LastEntry {
    sequence: u64,
    curr_hash: String,
}

/// COUNT 结果
#[derive(Debug, serde::Deserialize)]
struct CountResult {
    total: u64,
}

/// 审计日志存储 (SurrealDB)
///
/// Append-only 设计：
/// - 仅提供 `append`、`query`、`verify_chain`
/// - 没有 delete/update 接口
#[derive(Clone)]
pub struct AuditStorage {
    db: Surreal<Db>,
    /// 序列化所有 append 操作，防止 read-modify-write 竞争
    append_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AuditStorage {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            append_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// 追加一条审计日志
    ///
    /// 1. 查询当前最大序列号和 last_hash
    /// 2. 计算新条目的哈希
    /// 3. 写入条目
    pub async fn append(
        &self,
        table_name: String,
        record_id: String,
        action: AuditAction,
        old_data: Option<serde_json::Value>,
        new_data: Option<serde_json::Value>,
        changes: Option<Vec<FieldChange>>,
        changed_by: Option<String>,
    ) -> AuditStorageResult<AuditEntry> {
        // 序列化：防止并发 append 导致 sequence 冲突
        let _guard = self.append_lock.lock().await;

        let mut result = self
            .db
            .query("SELECT sequence, curr_hash FROM audit_log ORDER BY sequence DESC LIMIT 1")
            .await?;
        let last: Vec<LastEntry> = result.take(0)?;

        let (sequence, prev_hash) = match last.first() {
            Some(last) => (last.sequence + 1, last.curr_hash.clone()),
            None => (1, "genesis".to_string()),
        };

        let changed_at = shared::util::now_millis();
        let curr_hash = compute_audit_hash(
            &prev_hash,
            sequence,
            changed_at,
            action,
            &table_name,
            &record_id,
            old_data.as_ref(),
            new_data.as_ref(),
            changed_by.as_deref(),
        );

        let row = AuditRow {
            sequence,
            table_name,
            record_id,
            action,
            old_data,
            new_data,
            changes,
            changed_by,
            changed_at,
            prev_hash,
            curr_hash,
        };
        let entry = AuditEntry::from(row.clone());

        // bind 需要 'static，传 owned
        let mut res = self
            .db
            .query("CREATE audit_log CONTENT $data")
            .bind(("data", row))
            .await?;
        let _: Vec<AuditRow> = res.take(0)?;

        Ok(entry)
    }

    /// 查询审计日志
    pub async fn query(&self, q: &AuditQuery) -> AuditStorageResult<(Vec<AuditEntry>, u64)> {
        let mut conditions = Vec::new();

        if q.table_name.is_some() {
            conditions.push("table_name = $table_name");
        }
        if q.record_id.is_some() {
            conditions.push("record_id = $record_id");
        }
        if q.changed_by.is_some() {
            conditions.push("changed_by = $changed_by");
        }
        if q.from.is_some() {
            conditions.push("changed_at >= $from");
        }
        if q.to.is_some() {
            conditions.push("changed_at <= $to");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!(
            "SELECT count() as total FROM audit_log{} GROUP ALL",
            where_clause
        );
        let select_sql = format!(
            "SELECT * FROM audit_log{} ORDER BY sequence DESC LIMIT {} START {}",
            where_clause, q.limit, q.offset
        );
        let sql = format!("{}; {}", count_sql, select_sql);

        let mut qb = self.db.query(&sql);
        if let Some(ref table_name) = q.table_name {
            qb = qb.bind(("table_name", table_name.clone()));
        }
        if let Some(ref record_id) = q.record_id {
            qb = qb.bind(("record_id", record_id.clone()));
        }
        if let Some(ref changed_by) = q.changed_by {
            qb = qb.bind(("changed_by", changed_by.clone()));
        }
        if let Some(from) = q.from {
            qb = qb.bind(("from", from));
        }
        if let Some(to) = q.to {
            qb = qb.bind(("to", to));
        }

        let mut result = qb.await?;

        let count_result: Vec<CountResult> = result.take(0)?;
        let total = count_result.first().map(|c| c.total).unwrap_or(0);

        let rows: Vec<AuditRow> = result.take(1)?;
        let entries = rows.into_iter().map(AuditEntry::from).collect();

        Ok((entries, total))
    }

    /// 验证哈希链完整性
    ///
    /// 逐条重算哈希并检查 prev_hash 链接。断裂点全部上报。
    pub async fn verify_chain(&self) -> AuditStorageResult<AuditChainVerification> {
        let mut result = self
            .db
            .query("SELECT * FROM audit_log ORDER BY sequence ASC")
            .await?;
        let rows: Vec<AuditRow> = result.take(0)?;

        let mut breaks = Vec::new();
        let mut expected_prev = "genesis".to_string();

        for row in &rows {
            if row.prev_hash != expected_prev {
                breaks.push(AuditChainBreak {
                    sequence: row.sequence,
                    expected_prev_hash: expected_prev.clone(),
                    actual_prev_hash: row.prev_hash.clone(),
                });
            }
            let recomputed = compute_audit_hash(
                &row.prev_hash,
                row.sequence,
                row.changed_at,
                row.action,
                &row.table_name,
                &row.record_id,
                row.old_data.as_ref(),
                row.new_data.as_ref(),
                row.changed_by.as_deref(),
            );
            if recomputed != row.curr_hash {
                breaks.push(AuditChainBreak {
                    sequence: row.sequence,
                    expected_prev_hash: recomputed,
                    actual_prev_hash: row.curr_hash.clone(),
                });
            }
            expected_prev = row.curr_hash.clone();
        }

        Ok(AuditChainVerification {
            total_entries: rows.len() as u64,
            chain_intact: breaks.is_empty(),
            breaks,
        })
    }
}

/// 规范化 JSON Value — 将 SurrealDB 浮点退化的整数还原为 i64
///
/// SurrealDB 内部将数字存为 float，读出后 `5` 变成 `5.0`。
/// 哈希计算前统一规范化，使写入与读出的序列化结果一致。
///
/// 安全范围：f64 尾数 52 bit，仅 |value| ≤ 2^53 的整数可无损转换。
fn normalize_json(value: &serde_json::Value) -> serde_json::Value {
    /// f64 可精确表示的最大整数绝对值 (2^53)
    const MAX_SAFE_INT: f64 = (1_i64 << 53) as f64;

    match value {
        serde_json::Value::Number(n) => {
            if let Some(f) = n.as_f64()
                && f.fract() == 0.0
                && f.abs() <= MAX_SAFE_INT
            {
                return serde_json::Value::Number(serde_json::Number::from(f as i64));
            }
            value.clone()
        }
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize_json(v)))
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(normalize_json).collect())
        }
        _ => value.clone(),
    }
}

/// 计算条目哈希（所有存储字段参与，diff 除外 — diff 可由快照重建）
#[allow(clippy::too_many_arguments)]
fn compute_audit_hash(
    prev_hash: &str,
    sequence: u64,
    changed_at: i64,
    action: AuditAction,
    table_name: &str,
    record_id: &str,
    old_data: Option<&serde_json::Value>,
    new_data: Option<&serde_json::Value>,
    changed_by: Option<&str>,
) -> String {
    let old_json = old_data
        .map(|v| normalize_json(v).to_string())
        .unwrap_or_default();
    let new_json = new_data
        .map(|v| normalize_json(v).to_string())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(sequence.to_be_bytes());
    hasher.update(changed_at.to_be_bytes());
    hasher.update(action.to_string().as_bytes());
    hasher.update(table_name.as_bytes());
    hasher.update(record_id.as_bytes());
    hasher.update(old_json.as_bytes());
    hasher.update(new_json.as_bytes());
    hasher.update(changed_by.unwrap_or_default().as_bytes());
    hex::encode(hasher.finalize())
}
