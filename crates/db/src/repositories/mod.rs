//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and, for tenant data, the
//! caller's `agency_id` as the second.

pub mod agency_repo;
pub mod ai_usage_repo;
pub mod board_repo;
pub mod client_repo;
pub mod context_repo;
pub mod dashboard_repo;
pub mod expense_repo;
pub mod project_repo;
pub mod revenue_repo;
pub mod task_repo;
pub mod user_repo;

pub use agency_repo::AgencyRepo;
pub use ai_usage_repo::AiUsageRepo;
pub use board_repo::BoardRepo;
pub use client_repo::ClientRepo;
pub use context_repo::ContextRepo;
pub use dashboard_repo::DashboardRepo;
pub use expense_repo::ExpenseRepo;
pub use project_repo::ProjectRepo;
pub use revenue_repo::RevenueRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;

/// Build an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// escaped so user input is matched literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Treat blank filter strings as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
