//! Unified error codes for the attendance platform
//!
//! This module defines all error codes used across the server and its
//! external collaborators. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Actor/authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Workflow errors
//! - 4xxx: Resource errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Actor ====================
    /// No actor identity on the request
    NotAuthenticated = 1001,
    /// Actor id does not resolve to a known user
    UnknownActor = 1002,
    /// Actor account is disabled
    AccountDisabled = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Actor role does not match the record's current stage
    RoleStageMismatch = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Record's area is outside the actor's scope
    ScopeDenied = 2004,
    /// Record's worker nationality is outside the actor's restriction
    NationalityRestricted = 2005,
    /// Role has read-only oversight, no transition rights
    ReadOnlyRole = 2006,

    // ==================== 3xxx: Workflow ====================
    /// Record already advanced past the requester's authorized stage
    StaleStage = 3001,
    /// Record is at the terminal stage and immutable
    RecordTerminal = 3002,
    /// Cannot reject further back than the initial stage
    AlreadyAtInitialStage = 3003,
    /// Rejection requires a non-empty note
    RejectionNoteRequired = 3004,
    /// Concurrent write detected (version mismatch)
    VersionConflict = 3005,

    // ==================== 4xxx: Resource ====================
    /// Attendance record not found
    RecordNotFound = 4001,
    /// Worker not found
    WorkerNotFound = 4002,
    /// Area not found
    AreaNotFound = 4003,
    /// User not found
    UserNotFound = 4004,
    /// Attendance record already exists for this worker/period
    DuplicateRecord = 4005,
    /// Worker is soft-disabled
    WorkerDisabled = 4006,
    /// Area name already in use
    AreaNameExists = 4007,
    /// Worker badge id already in use
    DuplicateWorker = 4008,
    /// Month/year pair is not a valid period
    PeriodInvalid = 4009,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Mutation succeeded but the audit write was degraded
    AuditDegraded = 9004,
    /// Operation timed out
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "No actor identity on request",
            Self::UnknownActor => "Unknown actor",
            Self::AccountDisabled => "Account is disabled",

            Self::PermissionDenied => "Permission denied",
            Self::RoleStageMismatch => "Role not authorized for the record's current stage",
            Self::AdminRequired => "Admin role required",
            Self::ScopeDenied => "Record area is outside actor scope",
            Self::NationalityRestricted => "Worker nationality is outside actor restriction",
            Self::ReadOnlyRole => "Role has no transition rights",

            Self::StaleStage => "Record already past the requested stage",
            Self::RecordTerminal => "Record is approved and immutable",
            Self::AlreadyAtInitialStage => "Record is at the initial stage",
            Self::RejectionNoteRequired => "Rejection requires a note",
            Self::VersionConflict => "Concurrent modification detected",

            Self::RecordNotFound => "Attendance record not found",
            Self::WorkerNotFound => "Worker not found",
            Self::AreaNotFound => "Area not found",
            Self::UserNotFound => "User not found",
            Self::DuplicateRecord => "Attendance record already exists for this period",
            Self::WorkerDisabled => "Worker is disabled",
            Self::AreaNameExists => "Area name already in use",
            Self::DuplicateWorker => "Worker badge id already in use",
            Self::PeriodInvalid => "Invalid month/year period",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::AuditDegraded => "Audit write degraded",
            Self::TimeoutError => "Operation timed out",
        }
    }

    /// Wire representation, e.g. `E2002`
    pub fn as_code_string(&self) -> String {
        format!("E{:04}", *self as u16)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code_string())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when a u16 does not map to a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,
            7 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::UnknownActor,
            1003 => Self::AccountDisabled,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleStageMismatch,
            2003 => Self::AdminRequired,
            2004 => Self::ScopeDenied,
            2005 => Self::NationalityRestricted,
            2006 => Self::ReadOnlyRole,

            3001 => Self::StaleStage,
            3002 => Self::RecordTerminal,
            3003 => Self::AlreadyAtInitialStage,
            3004 => Self::RejectionNoteRequired,
            3005 => Self::VersionConflict,

            4001 => Self::RecordNotFound,
            4002 => Self::WorkerNotFound,
            4003 => Self::AreaNotFound,
            4004 => Self::UserNotFound,
            4005 => Self::DuplicateRecord,
            4006 => Self::WorkerDisabled,
            4007 => Self::AreaNameExists,
            4008 => Self::DuplicateWorker,
            4009 => Self::PeriodInvalid,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::AuditDegraded,
            9005 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::RoleStageMismatch,
            ErrorCode::StaleStage,
            ErrorCode::RecordNotFound,
            ErrorCode::AuditDegraded,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(ErrorCode::try_from(777), Err(InvalidErrorCode(777)));
    }

    #[test]
    fn code_string_is_zero_padded() {
        assert_eq!(ErrorCode::ValidationFailed.as_code_string(), "E0002");
        assert_eq!(ErrorCode::StaleStage.as_code_string(), "E3001");
    }
}
