//! Attendance record wire contract
//!
//! 考勤记录的线上/存储字段契约。字段名即存储列名，外部协作方
//! （报表、导入工具）按此结构读写。

use super::stage::Stage;
use serde::{Deserialize, Deserializer, Serialize};

/// Build the canonical record id for a worker/period.
///
/// Format: `"{workerId}-{month}-{year}"`, no zero padding, month/year as
/// plain decimal integers. This id is also the upsert conflict key.
pub fn record_key(worker_id: &str, month: u32, year: i32) -> String {
    format!("{worker_id}-{month}-{year}")
}

/// Lenient day-count deserializer.
///
/// Upstream data entry is tolerant: a missing, null, or non-numeric value
/// is treated as zero, never as an error. Accepts JSON numbers and numeric
/// strings.
pub fn lenient_days<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde_json::Value),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) if n.is_finite() => Ok(n),
        Some(Raw::Text(s)) => Ok(s.trim().parse::<f64>().unwrap_or(0.0)),
        _ => Ok(0.0),
    }
}

/// The four raw day-count fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DayCounts {
    /// Ordinary attendance days
    #[serde(default, deserialize_with = "lenient_days")]
    pub normal_days: f64,
    /// Regular-rate overtime days (weighted 0.5)
    #[serde(default, deserialize_with = "lenient_days")]
    pub overtime_normal_days: f64,
    /// Holiday overtime days (weighted 1.0)
    #[serde(default, deserialize_with = "lenient_days")]
    pub overtime_holiday_days: f64,
    /// Eid overtime days (weighted 1.0)
    #[serde(default, deserialize_with = "lenient_days")]
    pub overtime_eid_days: f64,
}

/// Persisted attendance record shape (wire/storage contract)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordDto {
    /// `"{workerId}-{month}-{year}"`
    pub id: String,
    pub worker_id: String,
    pub month: u32,
    pub year: i32,
    pub normal_days: f64,
    pub overtime_normal_days: f64,
    pub overtime_holiday_days: f64,
    pub overtime_eid_days: f64,
    /// Derived pay-day total; cache of the calculation formula
    pub total_calculated_days: f64,
    pub status: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_notes: Option<String>,
    /// Unix millis of last mutation
    pub updated_at: i64,
}

impl AttendanceRecordDto {
    /// Copy of the four raw day-count fields
    pub fn day_counts(&self) -> DayCounts {
        DayCounts {
            normal_days: self.normal_days,
            overtime_normal_days: self.overtime_normal_days,
            overtime_holiday_days: self.overtime_holiday_days,
            overtime_eid_days: self.overtime_eid_days,
        }
    }
}

/// Manual period-entry payload (creates a record at the initial stage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCreate {
    pub worker_id: String,
    pub month: u32,
    pub year: i32,
    #[serde(flatten)]
    pub days: DayCounts,
}

/// Reject transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    /// Structured reason code or free text; must be non-empty
    pub notes: String,
}

/// List filter for record queries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub status: Option<Stage>,
    /// Area id filter (further narrowed by the actor's scope)
    pub area: Option<String>,
}

/// Result of a transition or day-count edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub record: AttendanceRecordDto,
    /// True when the mutation succeeded but the audit write was degraded
    #[serde(default)]
    pub audit_degraded: bool,
}

/// Result of a create/seed request
///
/// Seeding is idempotent on the natural key: `created = false` means the
/// worker/period already had a record, returned here untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCreateResponse {
    pub record: AttendanceRecordDto,
    pub created: bool,
    #[serde(default)]
    pub audit_degraded: bool,
}

/// Standalone calculation preview result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalPreview {
    pub total_calculated_days: f64,
}
