//! Shared types for the attendance platform
//!
//! Wire and storage contract shared between the attendance server and its
//! external collaborators (import tooling, dashboards, report formatters):
//! status and role enumerations, scope encoding, record DTOs, the bulk
//! import contract, the audit entry shape, and the unified error system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{AreaScope, Role, Stage};
