//! Bulk import contract
//!
//! The spreadsheet collaborator parses workbook cells upstream; this
//! service only consumes the already-parsed row values. Ordered columns:
//! worker id, worker name, normal days, overtime-normal days,
//! overtime-holiday days, overtime-eid days, area name/id, daily rate.

use super::record::{lenient_days, DayCounts};
use serde::{Deserialize, Serialize};

/// One parsed spreadsheet row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRow {
    pub worker_id: String,
    pub worker_name: String,
    #[serde(default, deserialize_with = "lenient_days")]
    pub normal_days: f64,
    #[serde(default, deserialize_with = "lenient_days")]
    pub overtime_normal_days: f64,
    #[serde(default, deserialize_with = "lenient_days")]
    pub overtime_holiday_days: f64,
    #[serde(default, deserialize_with = "lenient_days")]
    pub overtime_eid_days: f64,
    /// Area display name or id; unseen names create the area on demand
    pub area: String,
    #[serde(default, deserialize_with = "lenient_days")]
    pub daily_rate: f64,
}

impl ImportRow {
    /// The four day-count fields of this row
    pub fn day_counts(&self) -> DayCounts {
        DayCounts {
            normal_days: self.normal_days,
            overtime_normal_days: self.overtime_normal_days,
            overtime_holiday_days: self.overtime_holiday_days,
            overtime_eid_days: self.overtime_eid_days,
        }
    }
}

/// Import request envelope: target period + rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<ImportRow>,
}

/// Per-row import outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportRowStatus {
    /// Record seeded for this worker/period
    Created,
    /// A record for this worker/period already existed; left untouched
    Skipped,
    /// Row rejected; see message
    Failed,
}

/// Outcome of a single row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowOutcome {
    pub worker_id: String,
    pub status: ImportRowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Batch import report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub total: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<ImportRowOutcome>,
    /// True when any audit write in the batch was degraded
    #[serde(default)]
    pub audit_degraded: bool,
}

impl ImportReport {
    /// Tally a report from row outcomes
    pub fn from_outcomes(outcomes: Vec<ImportRowOutcome>, audit_degraded: bool) -> Self {
        let created = outcomes
            .iter()
            .filter(|o| o.status == ImportRowStatus::Created)
            .count();
        let skipped = outcomes
            .iter()
            .filter(|o| o.status == ImportRowStatus::Skipped)
            .count();
        let failed = outcomes
            .iter()
            .filter(|o| o.status == ImportRowStatus::Failed)
            .count();
        Self {
            total: outcomes.len(),
            created,
            skipped,
            failed,
            outcomes,
            audit_degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tallies_outcomes() {
        let outcomes = vec![
            ImportRowOutcome {
                worker_id: "W1".into(),
                status: ImportRowStatus::Created,
                message: None,
            },
            ImportRowOutcome {
                worker_id: "W2".into(),
                status: ImportRowStatus::Skipped,
                message: None,
            },
            ImportRowOutcome {
                worker_id: "W3".into(),
                status: ImportRowStatus::Failed,
                message: Some("daily rate out of range".into()),
            },
        ];
        let report = ImportReport::from_outcomes(outcomes, false);
        assert_eq!(report.total, 3);
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn row_tolerates_messy_numeric_cells() {
        let row: ImportRow = serde_json::from_str(
            r#"{"worker_id":"W9","worker_name":"A. Hassan","normal_days":"26",
                "overtime_eid_days":"","area":"North District","daily_rate":"85.5"}"#,
        )
        .unwrap();
        assert_eq!(row.normal_days, 26.0);
        assert_eq!(row.overtime_eid_days, 0.0);
        assert_eq!(row.daily_rate, 85.5);
    }
}
