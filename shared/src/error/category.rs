//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Actor errors
/// - 2xxx: Permission errors
/// - 3xxx: Workflow errors
/// - 4xxx: Resource errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Actor errors (1xxx)
    Actor,
    /// Permission errors (2xxx)
    Permission,
    /// Workflow errors (3xxx)
    Workflow,
    /// Resource errors (4xxx)
    Resource,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Actor,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Workflow,
            4000..5000 => Self::Resource,
            _ => Self::System,
        }
    }
}

impl From<ErrorCode> for ErrorCategory {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_range() {
        assert_eq!(
            ErrorCategory::from(ErrorCode::ValidationFailed),
            ErrorCategory::General
        );
        assert_eq!(
            ErrorCategory::from(ErrorCode::ScopeDenied),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCategory::from(ErrorCode::StaleStage),
            ErrorCategory::Workflow
        );
        assert_eq!(
            ErrorCategory::from(ErrorCode::AuditDegraded),
            ErrorCategory::System
        );
    }
}
