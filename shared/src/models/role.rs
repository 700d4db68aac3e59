//! Actor roles
//!
//! The role set is fixed by the approval workflow; roles are not
//! user-configurable rows. Each transition role is tied to exactly one
//! pipeline stage (see the server's stage-authorization table).

use serde::{Deserialize, Serialize};

/// Fixed role enumeration (wire strings per the platform contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Supervisor,
    GeneralSupervisor,
    HealthDirector,
    Hr,
    InternalAudit,
    Finance,
    Payroll,
    /// May act at any stage (override)
    Admin,
    /// Read-only oversight, no transition rights
    Mayor,
}

impl Role {
    /// Exact wire string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Supervisor => "SUPERVISOR",
            Role::GeneralSupervisor => "GENERAL_SUPERVISOR",
            Role::HealthDirector => "HEALTH_DIRECTOR",
            Role::Hr => "HR",
            Role::InternalAudit => "INTERNAL_AUDIT",
            Role::Finance => "FINANCE",
            Role::Payroll => "PAYROLL",
            Role::Admin => "ADMIN",
            Role::Mayor => "MAYOR",
        }
    }

    /// Whether this role may override stage gating
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
