//! 审计日志 JSON diff 计算
//!
//! 通过比较更新前后的 JSON 值，自动生成字段级变更差异。
//! 浮点数使用容差比较避免精度问题。

use serde_json::Value;
use shared::models::FieldChange;
use std::collections::BTreeSet;

/// 浮点数比较容差 (用于处理序列化/反序列化精度损失)
const FLOAT_EPSILON: f64 = 1e-9;

/// Fields excluded from diffs for a given table
pub fn excluded_fields(table_name: &str) -> &'static [&'static str] {
    match table_name {
        // version is bookkeeping, updated_at changes on every write
        "attendance_record" => &["id", "version", "updated_at"],
        _ => &["id"],
    }
}

/// 递归比较两个 JSON 值是否相等（浮点数使用容差比较）
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => (fa - fb).abs() < FLOAT_EPSILON,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(va, vb)| values_equal(va, vb))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| values_equal(va, vb)))
        }
        _ => false,
    }
}

/// Field-level diff between two object snapshots.
///
/// Returns one [`FieldChange`] per top-level field whose value differs;
/// fields present on only one side diff against `Null`.
pub fn diff_snapshots(old: &Value, new: &Value, exclude: &[&str]) -> Vec<FieldChange> {
    let empty = serde_json::Map::new();
    let old_map = old.as_object().unwrap_or(&empty);
    let new_map = new.as_object().unwrap_or(&empty);

    let keys: BTreeSet<&String> = old_map.keys().chain(new_map.keys()).collect();

    keys.into_iter()
        .filter(|key| !exclude.contains(&key.as_str()))
        .filter_map(|key| {
            let from = old_map.get(key).cloned().unwrap_or(Value::Null);
            let to = new_map.get(key).cloned().unwrap_or(Value::Null);
            if values_equal(&from, &to) {
                None
            } else {
                Some(FieldChange {
                    field: key.clone(),
                    from,
                    to,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_changed_fields_only() {
        let old = json!({"status": "PENDING_GS", "normal_days": 22.0, "version": 3});
        let new = json!({"status": "PENDING_HEALTH", "normal_days": 22.0, "version": 4});
        let changes = diff_snapshots(&old, &new, excluded_fields("attendance_record"));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "status");
        assert_eq!(changes[0].from, json!("PENDING_GS"));
        assert_eq!(changes[0].to, json!("PENDING_HEALTH"));
    }

    #[test]
    fn float_degradation_is_not_a_change() {
        let old = json!({"normal_days": 22});
        let new = json!({"normal_days": 22.0});
        assert!(diff_snapshots(&old, &new, &[]).is_empty());
    }

    #[test]
    fn missing_field_diffs_against_null() {
        let old = json!({"rejection_notes": "missing signature"});
        let new = json!({});
        let changes = diff_snapshots(&old, &new, &[]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to, serde_json::Value::Null);
    }
}
