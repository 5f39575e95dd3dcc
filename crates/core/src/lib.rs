//! Pure domain logic for the booking platform.
//!
//! This crate has zero internal dependencies so the scheduling algorithm,
//! status value sets, and progress math can be used by the API layer, the
//! repository layer, and any future CLI tooling without pulling in sqlx or
//! axum.

pub mod booking;
pub mod error;
pub mod progress;
pub mod roles;
pub mod scheduling;
pub mod status;
pub mod types;
