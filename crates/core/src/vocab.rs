//! Closed string vocabularies stored in TEXT columns.
//!
//! Each list must match the `ck_<table>_<column>` check constraint in the
//! migrations. Validation helpers live in [`crate::validation`].

// ---------------------------------------------------------------------------
// Agencies
// ---------------------------------------------------------------------------

pub const PLAN_FREE: &str = "free";
pub const PLAN_PRO: &str = "pro";
pub const PLAN_ENTERPRISE: &str = "enterprise";

pub const VALID_PLANS: &[&str] = &[PLAN_FREE, PLAN_PRO, PLAN_ENTERPRISE];

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

pub const CLIENT_ACTIVE: &str = "active";
pub const CLIENT_INACTIVE: &str = "inactive";
pub const CLIENT_PROSPECT: &str = "prospect";

pub const VALID_CLIENT_STATUSES: &[&str] = &[CLIENT_ACTIVE, CLIENT_INACTIVE, CLIENT_PROSPECT];

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub const PROJECT_PLANNING: &str = "planning";
pub const PROJECT_IN_PROGRESS: &str = "in_progress";
pub const PROJECT_REVIEW: &str = "review";
pub const PROJECT_COMPLETED: &str = "completed";
pub const PROJECT_CANCELLED: &str = "cancelled";

pub const VALID_PROJECT_STATUSES: &[&str] = &[
    PROJECT_PLANNING,
    PROJECT_IN_PROGRESS,
    PROJECT_REVIEW,
    PROJECT_COMPLETED,
    PROJECT_CANCELLED,
];

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

pub const TASK_TODO: &str = "todo";
pub const TASK_IN_PROGRESS: &str = "in_progress";
pub const TASK_REVIEW: &str = "review";
pub const TASK_DONE: &str = "done";

/// Task statuses in board column order.
pub const TASK_COLUMNS: &[&str] = &[TASK_TODO, TASK_IN_PROGRESS, TASK_REVIEW, TASK_DONE];

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

pub const VALID_PRIORITIES: &[&str] = &[
    PRIORITY_LOW,
    PRIORITY_MEDIUM,
    PRIORITY_HIGH,
    PRIORITY_URGENT,
];

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

pub const REVENUE_PENDING: &str = "pending";
pub const REVENUE_RECEIVED: &str = "received";

pub const VALID_REVENUE_STATUSES: &[&str] = &[REVENUE_PENDING, REVENUE_RECEIVED];

/// Maximum length of a free-form finance category label.
pub const MAX_CATEGORY_LENGTH: usize = 60;
