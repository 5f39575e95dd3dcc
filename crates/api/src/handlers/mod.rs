//! Request handlers, one module per resource.

pub mod assignments;
pub mod catalog;
pub mod generation;
pub mod orders;
pub mod progress;
pub mod sessions;
