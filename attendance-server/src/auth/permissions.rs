//! Stage authorization table
//!
//! 每个非终态阶段恰好由一个角色负责。单一查表驱动全部阶段门控，
//! 不在代码各处分散按角色分支。

use shared::models::{Role, Stage};

/// The single Stage → Role authorization table
pub const STAGE_AUTHORIZATION: &[(Stage, Role)] = &[
    (Stage::PendingSupervisor, Role::Supervisor),
    (Stage::PendingGs, Role::GeneralSupervisor),
    (Stage::PendingHealth, Role::HealthDirector),
    (Stage::PendingHr, Role::Hr),
    (Stage::PendingAudit, Role::InternalAudit),
    (Stage::PendingFinance, Role::Finance),
    (Stage::PendingPayroll, Role::Payroll),
];

/// Role authorized to act on a stage; `None` for the terminal stage
pub fn required_role(stage: Stage) -> Option<Role> {
    STAGE_AUTHORIZATION
        .iter()
        .find(|(s, _)| *s == stage)
        .map(|(_, r)| *r)
}

/// The one stage a transition role is authorized for.
///
/// `None` for `Admin` (acts anywhere) and `Mayor` (read-only oversight).
pub fn authorized_stage(role: Role) -> Option<Stage> {
    STAGE_AUTHORIZATION
        .iter()
        .find(|(_, r)| *r == role)
        .map(|(s, _)| *s)
}

/// Whether the role may act on the given stage (admin overrides)
pub fn can_act(role: Role, stage: Stage) -> bool {
    if role.is_admin() {
        return !stage.is_terminal();
    }
    required_role(stage) == Some(role)
}
