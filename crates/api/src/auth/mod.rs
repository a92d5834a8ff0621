//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT session-token generation and validation.
//! - [`cookie`] -- The `agencia_session` cookie carrying the same token.

pub mod cookie;
pub mod jwt;
pub mod password;
