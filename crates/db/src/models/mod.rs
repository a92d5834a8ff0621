//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//! - A `Deserialize` filter struct for list endpoints, where the resource has one

pub mod agency;
pub mod ai_usage;
pub mod board;
pub mod client;
pub mod dashboard;
pub mod expense;
pub mod project;
pub mod revenue;
pub mod task;
pub mod user;
