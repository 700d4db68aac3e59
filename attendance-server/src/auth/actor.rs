//! Current actor context

use crate::db::models::AppUser;
use shared::models::{AreaScope, Role};

/// The acting user of the current request (already authenticated upstream)
#[derive(Debug, Clone)]
pub struct CurrentActor {
    /// User id ("app_user:…")
    pub id: String,
    pub name: String,
    pub role: Role,
    pub scope: AreaScope,
    /// When set, the actor only sees records of workers with this nationality
    pub nationality_restriction: Option<String>,
}

impl CurrentActor {
    /// Whether the actor may override stage gating
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the nationality restriction (if any) covers the worker
    pub fn covers_nationality(&self, nationality: &str) -> bool {
        match &self.nationality_restriction {
            Some(restricted) => restricted == nationality,
            None => true,
        }
    }
}

impl From<AppUser> for CurrentActor {
    fn from(user: AppUser) -> Self {
        Self {
            id: user.id.map(|id| id.to_string()).unwrap_or_default(),
            name: user.name,
            role: user.role,
            scope: user.scope,
            nationality_restriction: user.nationality_restriction,
        }
    }
}
