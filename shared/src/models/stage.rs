//! Approval pipeline stages
//!
//! 审批管道阶段定义。阶段是全序的：记录只能按固定顺序逐级前进，
//! 或被驳回后退一级。`APPROVED` 为终态。

use serde::{Deserialize, Serialize};

/// One discrete status value in the approval pipeline.
///
/// Wire values are the exact storage strings (`PENDING_SUPERVISOR`, …,
/// `APPROVED`). Variant order IS the pipeline order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    PendingSupervisor,
    PendingGs,
    PendingHealth,
    PendingHr,
    PendingAudit,
    PendingFinance,
    PendingPayroll,
    Approved,
}

/// All stages in pipeline order (initial → terminal)
pub const STAGE_ORDER: [Stage; 8] = [
    Stage::PendingSupervisor,
    Stage::PendingGs,
    Stage::PendingHealth,
    Stage::PendingHr,
    Stage::PendingAudit,
    Stage::PendingFinance,
    Stage::PendingPayroll,
    Stage::Approved,
];

impl Stage {
    /// The initial pipeline stage
    pub const fn initial() -> Self {
        Stage::PendingSupervisor
    }

    /// Whether this stage is terminal (no further forward transition)
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Stage::Approved)
    }

    /// Position in the pipeline, 0-based
    pub fn position(&self) -> usize {
        STAGE_ORDER.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Next stage in the fixed order; `None` at the terminal stage
    pub fn next(&self) -> Option<Stage> {
        let idx = self.position();
        STAGE_ORDER.get(idx + 1).copied()
    }

    /// Previous stage in the fixed order; `None` at the initial stage
    pub fn prev(&self) -> Option<Stage> {
        let idx = self.position();
        idx.checked_sub(1).map(|i| STAGE_ORDER[i])
    }

    /// Exact wire string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Stage::PendingSupervisor => "PENDING_SUPERVISOR",
            Stage::PendingGs => "PENDING_GS",
            Stage::PendingHealth => "PENDING_HEALTH",
            Stage::PendingHr => "PENDING_HR",
            Stage::PendingAudit => "PENDING_AUDIT",
            Stage::PendingFinance => "PENDING_FINANCE",
            Stage::PendingPayroll => "PENDING_PAYROLL",
            Stage::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGE_ORDER
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("unknown stage: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_total_and_sequential() {
        for pair in STAGE_ORDER.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].prev(), Some(pair[0]));
        }
        assert_eq!(Stage::Approved.next(), None);
        assert_eq!(Stage::PendingSupervisor.prev(), None);
    }

    #[test]
    fn wire_strings_match_contract() {
        assert_eq!(
            serde_json::to_string(&Stage::PendingGs).unwrap(),
            "\"PENDING_GS\""
        );
        assert_eq!(
            serde_json::to_string(&Stage::PendingHr).unwrap(),
            "\"PENDING_HR\""
        );
        let parsed: Stage = serde_json::from_str("\"APPROVED\"").unwrap();
        assert_eq!(parsed, Stage::Approved);
    }

    #[test]
    fn from_str_round_trips() {
        for stage in STAGE_ORDER {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
        assert!("PENDING_MAYOR".parse::<Stage>().is_err());
    }
}
