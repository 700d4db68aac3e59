//! Worker Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Worker ID type; the record key is the external badge id
pub type WorkerId = RecordId;

/// Multiplier turning a daily rate into the advisory base salary
pub const BASE_SALARY_DAYS: f64 = 30.0;

/// Field worker entity
///
/// The badge id is globally unique and stable across periods; it is the
/// SurrealDB record key, so re-importing the same badge upserts instead of
/// duplicating. Workers are never hard-deleted while attendance history
/// references them; `is_active = false` soft-disables instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<WorkerId>,
    /// External badge/ID string (immutable)
    pub badge: String,
    pub name: String,
    /// Owning area reference
    #[serde(with = "serde_helpers::record_id")]
    pub area: RecordId,
    /// Nationality tag (drives actor nationality restrictions)
    pub nationality: String,
    /// Per-day pay rate
    pub daily_rate: f64,
    /// Derived: daily_rate × 30, advisory only, recomputed on every write
    pub base_salary: f64,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Create worker payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerCreate {
    pub badge: String,
    pub name: String,
    /// Area id ("area:…")
    pub area: String,
    #[serde(default)]
    pub nationality: String,
    pub daily_rate: f64,
}

/// Update worker payload (badge is immutable and absent here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Worker {
    /// Advisory base salary for a daily rate
    pub fn base_salary_for(daily_rate: f64) -> f64 {
        daily_rate * BASE_SALARY_DAYS
    }
}
