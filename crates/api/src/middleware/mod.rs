//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- The authenticated user and their agency, from a
//!   Bearer token or the session cookie.
//! - [`rbac::RequireManager`] -- Requires the `owner` or `admin` role.

pub mod auth;
pub mod rbac;
