//! Attendance Record Model
//!
//! 月度考勤记录 — 本系统治理的核心实体。自然键 (worker, month, year)
//! 直接构成 SurrealDB record key，重试同一逻辑操作天然幂等。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{record_key, AttendanceRecordDto, DayCounts, Stage};
use surrealdb::RecordId;

/// SurrealDB table name
pub const TABLE: &str = "attendance_record";

/// Per-worker, per-period attendance record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Worker badge id (natural key part)
    pub worker_id: String,
    pub month: u32,
    pub year: i32,
    pub normal_days: f64,
    pub overtime_normal_days: f64,
    pub overtime_holiday_days: f64,
    pub overtime_eid_days: f64,
    /// Cache of the pay-day formula, recomputable from the four day
    /// fields; read paths that doubt freshness recompute
    pub total_calculated_days: f64,
    pub status: Stage,
    /// Present only meaningfully after a rejection transition
    #[serde(default)]
    pub rejection_notes: Option<String>,
    /// Unix millis of last mutation
    pub updated_at: i64,
    /// Optimistic-concurrency guard, incremented on every write
    #[serde(default)]
    pub version: i64,
}

impl AttendanceRecord {
    /// Natural-key string: `"{workerId}-{month}-{year}"`
    pub fn key(&self) -> String {
        record_key(&self.worker_id, self.month, self.year)
    }

    /// SurrealDB record id for the natural key
    pub fn record_id(&self) -> RecordId {
        record_id_for(&self.worker_id, self.month, self.year)
    }

    /// Copy of the four raw day-count fields
    pub fn day_counts(&self) -> DayCounts {
        DayCounts {
            normal_days: self.normal_days,
            overtime_normal_days: self.overtime_normal_days,
            overtime_holiday_days: self.overtime_holiday_days,
            overtime_eid_days: self.overtime_eid_days,
        }
    }

    /// Replace the four day-count fields
    pub fn set_day_counts(&mut self, days: DayCounts) {
        self.normal_days = days.normal_days;
        self.overtime_normal_days = days.overtime_normal_days;
        self.overtime_holiday_days = days.overtime_holiday_days;
        self.overtime_eid_days = days.overtime_eid_days;
    }

    /// Wire DTO (field names are the storage contract)
    pub fn to_dto(&self) -> AttendanceRecordDto {
        AttendanceRecordDto {
            id: self.key(),
            worker_id: self.worker_id.clone(),
            month: self.month,
            year: self.year,
            normal_days: self.normal_days,
            overtime_normal_days: self.overtime_normal_days,
            overtime_holiday_days: self.overtime_holiday_days,
            overtime_eid_days: self.overtime_eid_days,
            total_calculated_days: self.total_calculated_days,
            status: self.status,
            rejection_notes: self.rejection_notes.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// SurrealDB record id for a worker/period natural key
pub fn record_id_for(worker_id: &str, month: u32, year: i32) -> RecordId {
    RecordId::from_table_key(TABLE, record_key(worker_id, month, year))
}
