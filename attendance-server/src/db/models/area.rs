//! Area Model (组织/地理辖区)

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type AreaId = RecordId;

/// Organizational/geographic sector
///
/// Created on demand when an import references an unseen area name.
/// Name is unique among active areas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AreaId>,
    pub name: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Create area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
}

/// Update area payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
