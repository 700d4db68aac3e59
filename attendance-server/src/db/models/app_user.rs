//! User Model
//!
//! 系统操作者（actor）。身份认证由外部身份源完成，本服务只保存
//! 角色与辖区授权。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::{AreaScope, Role};
use surrealdb::RecordId;

pub type UserId = RecordId;

/// An actor with a role and an area scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUser {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    /// Fixed role enumeration; determines which pipeline stage the actor
    /// may act on
    pub role: Role,
    /// Area scope; determines which areas' records are visible
    pub scope: AreaScope,
    /// Actor may be limited to records for workers of one nationality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality_restriction: Option<String>,
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

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub role: Role,
    pub scope: AreaScope,
    #[serde(default)]
    pub nationality_restriction: Option<String>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<AreaScope>,
    /// Absent = keep, explicit null = clear, string = set
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub nationality_restriction: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Distinguish an absent field (None) from an explicit null (Some(None))
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    Option::<String>::deserialize(deserializer).map(Some)
}
