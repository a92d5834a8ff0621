//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

pub const VALID_ROLES: &[&str] = &[ROLE_OWNER, ROLE_ADMIN, ROLE_MEMBER];

/// Owners and admins may manage agency settings and team members.
pub fn is_manager(role: &str) -> bool {
    role == ROLE_OWNER || role == ROLE_ADMIN
}
