//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod catalog_repo;
pub mod customer_repo;
pub mod employee_repo;
pub mod generation_repo;
pub mod order_repo;
pub mod session_repo;

pub use assignment_repo::AssignmentRepo;
pub use catalog_repo::CatalogRepo;
pub use customer_repo::CustomerRepo;
pub use employee_repo::EmployeeRepo;
pub use generation_repo::{CommitResult, CommittedTrack, GenerationRepo, PlannedTrack};
pub use order_repo::OrderRepo;
pub use session_repo::SessionRepo;
