//! Audit log wire contract
//!
//! 审计日志条目：对存储层每次 create/update/delete 追加一条不可变记录，
//! 含完整的前后快照与 SHA256 哈希链。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action kind recorded against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditAction::Insert => "INSERT",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// A single field-level change between old and new snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: Value,
    pub to: Value,
}

/// Immutable audit log entry
///
/// `old_data` is null for creates, `new_data` is null for deletes.
/// `prev_hash`/`curr_hash` form a SHA256 chain: genesis → entry₁ → … → entryₙ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Global monotonically increasing sequence number
    pub sequence: u64,
    /// Store table the mutation hit (e.g. "attendance_record")
    pub table_name: String,
    /// Affected record id
    pub record_id: String,
    pub action: AuditAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_data: Option<Value>,
    /// Field-level diff for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<FieldChange>>,
    /// Acting user id; None for system mutations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    /// Unix millis
    pub changed_at: i64,
    /// Hash of the previous entry
    pub prev_hash: String,
    /// SHA256 over this entry's content + prev_hash
    pub curr_hash: String,
}

/// Audit log query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AuditQuery {
    pub table_name: Option<String>,
    pub record_id: Option<String>,
    pub changed_by: Option<String>,
    /// Unix millis, inclusive
    pub from: Option<i64>,
    /// Unix millis, inclusive
    pub to: Option<i64>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            table_name: None,
            record_id: None,
            changed_by: None,
            from: None,
            to: None,
            offset: 0,
            limit: default_limit(),
        }
    }
}

/// Audit log list response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditEntry>,
    pub total: u64,
}

/// Hash chain verification result
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditChainVerification {
    pub total_entries: u64,
    pub chain_intact: bool,
    pub breaks: Vec<AuditChainBreak>,
}

/// A break point in the hash chain
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditChainBreak {
    pub sequence: u64,
    pub expected_prev_hash: String,
    pub actual_prev_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_strings_are_uppercase() {
        assert_eq!(
            serde_json::to_string(&AuditAction::Insert).unwrap(),
            "\"INSERT\""
        );
        assert_eq!(AuditAction::Delete.to_string(), "DELETE");
    }

    #[test]
    fn create_entry_omits_old_data() {
        let entry = AuditEntry {
            sequence: 1,
            table_name: "worker".into(),
            record_id: "worker:W1".into(),
            action: AuditAction::Insert,
            old_data: None,
            new_data: Some(serde_json::json!({"name": "A"})),
            changes: None,
            changed_by: Some("app_user:1".into()),
            changed_at: 1_700_000_000_000,
            prev_hash: "genesis".into(),
            curr_hash: "abc".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("old_data"));
        assert!(json.contains("new_data"));
    }
}
