//! Domain types and pure business rules for the AgênciaOS backend.
//!
//! Nothing in this crate performs I/O. Database access lives in
//! `agencia-db`, outbound HTTP in `agencia-providers`.

pub mod assistants;
pub mod carousel;
pub mod context;
pub mod error;
pub mod finance;
pub mod kanban;
pub mod naming;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
pub mod vocab;
