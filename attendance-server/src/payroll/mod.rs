//! Payroll calculation
//!
//! Pure pay-day scoring of attendance day counts. No side effects; the
//! calculator is callable standalone for previews before committing a
//! transition.

mod calculator;

pub use calculator::{calculate_total, coerce_non_negative};
