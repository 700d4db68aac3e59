//! Attendance Record Repository
//!
//! 考勤记录仓库。所有写入都是以自然键构造的 record id 为冲突键的
//! upsert；状态写入走乐观并发（version 比对），由调用方决定重试。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::attendance_record::{record_id_for, AttendanceRecord, TABLE};
use crate::payroll;
use shared::models::RecordQuery;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

#[derive(Clone)]
pub struct AttendanceRecordRepository {
    base: BaseRepository,
}

impl AttendanceRecordRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a record by its wire id (`"{workerId}-{month}-{year}"`)
    pub async fn find_by_id(&self, wire_id: &str) -> RepoResult<Option<AttendanceRecord>> {
        let thing = surrealdb::RecordId::from_table_key(TABLE, wire_id);
        let record: Option<AttendanceRecord> = self.base.db().select(thing).await?;
        Ok(record.map(Self::normalize))
    }

    /// Find a record by its natural key
    pub async fn find_by_key(
        &self,
        worker_id: &str,
        month: u32,
        year: i32,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let record: Option<AttendanceRecord> = self
            .base
            .db()
            .select(record_id_for(worker_id, month, year))
            .await?;
        Ok(record.map(Self::normalize))
    }

    /// List records matching the filter.
    ///
    /// `badge_filter` narrows to the given worker badges (the caller derives
    /// it from the actor's resolved area scope); `None` means unrestricted.
    pub async fn list(
        &self,
        query: &RecordQuery,
        badge_filter: Option<Vec<String>>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let mut conditions = Vec::new();

        if query.month.is_some() {
            conditions.push("month = $month");
        }
        if query.year.is_some() {
            conditions.push("year = $year");
        }
        if query.status.is_some() {
            conditions.push("status = $status");
        }
        if badge_filter.is_some() {
            conditions.push("worker_id IN $badges");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT * FROM attendance_record{} ORDER BY year, month, worker_id",
            where_clause
        );

        let mut qb = self.base.db().query(&sql);
        if let Some(month) = query.month {
            qb = qb.bind(("month", month));
        }
        if let Some(year) = query.year {
            qb = qb.bind(("year", year));
        }
        if let Some(status) = query.status {
            qb = qb.bind(("status", status));
        }
        if let Some(badges) = badge_filter {
            qb = qb.bind(("badges", badges));
        }

        let records: Vec<AttendanceRecord> = qb.await?.take(0)?;
        Ok(records.into_iter().map(Self::normalize).collect())
    }

    /// Create a brand-new record (bulk import seed / manual entry).
    ///
    /// The record id is the natural key, so a concurrent duplicate create
    /// fails at the storage layer and is reported as `Duplicate`.
    pub async fn create(&self, record: &AttendanceRecord) -> RepoResult<AttendanceRecord> {
        if self
            .find_by_key(&record.worker_id, record.month, record.year)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Attendance record {} already exists",
                record.key()
            )));
        }

        let result = self
            .base
            .db()
            .query(
                r#"CREATE $thing SET
                    worker_id = $worker_id,
                    month = $month,
                    year = $year,
                    normal_days = $normal_days,
                    overtime_normal_days = $overtime_normal_days,
                    overtime_holiday_days = $overtime_holiday_days,
                    overtime_eid_days = $overtime_eid_days,
                    total_calculated_days = $total,
                    status = $status,
                    rejection_notes = $notes,
                    updated_at = $now,
                    version = 1
                RETURN AFTER"#,
            )
            .bind(("thing", record.record_id()))
            .bind(("worker_id", record.worker_id.clone()))
            .bind(("month", record.month))
            .bind(("year", record.year))
            .bind(("normal_days", record.normal_days))
            .bind(("overtime_normal_days", record.overtime_normal_days))
            .bind(("overtime_holiday_days", record.overtime_holiday_days))
            .bind(("overtime_eid_days", record.overtime_eid_days))
            .bind(("total", record.total_calculated_days))
            .bind(("status", record.status))
            .bind(("notes", record.rejection_notes.clone()))
            .bind(("now", shared::util::now_millis()))
            .await;

        let mut result = match result {
            Ok(r) => r,
            // Lost a create race: the natural key now exists
            Err(e) if e.to_string().contains("already exists") => {
                return Err(RepoError::Duplicate(format!(
                    "Attendance record {} already exists",
                    record.key()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let created: Option<AttendanceRecord> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create attendance record".to_string()))
    }

    /// Persist a new version of the record, guarded by the version counter.
    ///
    /// The write applies only when the stored `version` still equals
    /// `expected_version`; otherwise the record was concurrently modified
    /// and `Conflict` is returned so the caller can re-read and retry.
    pub async fn update_guarded(
        &self,
        record: &AttendanceRecord,
        expected_version: i64,
    ) -> RepoResult<AttendanceRecord> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    normal_days = $normal_days,
                    overtime_normal_days = $overtime_normal_days,
                    overtime_holiday_days = $overtime_holiday_days,
                    overtime_eid_days = $overtime_eid_days,
                    total_calculated_days = $total,
                    status = $status,
                    rejection_notes = $notes,
                    updated_at = $now,
                    version = version + 1
                WHERE version = $expected
                RETURN AFTER"#,
            )
            .bind(("thing", record.record_id()))
            .bind(("normal_days", record.normal_days))
            .bind(("overtime_normal_days", record.overtime_normal_days))
            .bind(("overtime_holiday_days", record.overtime_holiday_days))
            .bind(("overtime_eid_days", record.overtime_eid_days))
            .bind(("total", record.total_calculated_days))
            .bind(("status", record.status))
            .bind(("notes", record.rejection_notes.clone()))
            .bind(("now", shared::util::now_millis()))
            .bind(("expected", expected_version))
            .await?;

        let updated: Option<AttendanceRecord> = result.take(0)?;
        updated.ok_or_else(|| {
            RepoError::Conflict(format!(
                "Attendance record {} was concurrently modified",
                record.key()
            ))
        })
    }

    /// The stored total is a cache, not a source of truth; recompute when
    /// it disagrees with the four day fields.
    fn normalize(mut record: AttendanceRecord) -> AttendanceRecord {
        let expected = payroll::calculate_total(&record.day_counts());
        if (record.total_calculated_days - expected).abs() > f64::EPSILON {
            tracing::warn!(
                record = %record.key(),
                stored = record.total_calculated_days,
                expected,
                "stale total_calculated_days, recomputed on read"
            );
            record.total_calculated_days = expected;
        }
        record
    }
}
