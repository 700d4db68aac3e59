//! DB model → API response conversions

use crate::auth::ScopeResolver;
use crate::db::models::Worker;
use serde::Serialize;

/// Worker response enriched with the resolved area display name
#[derive(Debug, Clone, Serialize)]
pub struct WorkerResponse {
    /// Badge id
    pub badge: String,
    pub name: String,
    /// Area id ("area:…")
    pub area: String,
    /// Resolved display name; unknown ids degrade to the raw id
    pub area_name: String,
    pub nationality: String,
    pub daily_rate: f64,
    /// Advisory: daily_rate × 30
    pub base_salary: f64,
    pub is_active: bool,
}

impl WorkerResponse {
    pub fn from_worker(worker: &Worker, resolver: &ScopeResolver) -> Self {
        let area = worker.area.to_string();
        Self {
            badge: worker.badge.clone(),
            name: worker.name.clone(),
            area_name: resolver.area_name(&area),
            area,
            nationality: worker.nationality.clone(),
            daily_rate: worker.daily_rate,
            base_salary: worker.base_salary,
            is_active: worker.is_active,
        }
    }
}
