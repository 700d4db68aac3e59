//! Database models matching the SurrealDB schema

pub mod app_user;
pub mod area;
pub mod attendance_record;
pub mod serde_helpers;
pub mod worker;

// Re-exports
pub use app_user::{AppUser, UserCreate, UserId, UserUpdate};
pub use area::{Area, AreaCreate, AreaId, AreaUpdate};
pub use attendance_record::{record_id_for, AttendanceRecord};
pub use worker::{Worker, WorkerCreate, WorkerId, WorkerUpdate};
