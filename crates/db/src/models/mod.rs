//! Database row models and request/response DTOs.

pub mod assignment;
pub mod catalog;
pub mod customer;
pub mod employee;
pub mod order;
pub mod session;
