//! Aggregate rows backing `GET /dashboard/stats`.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct ClientCounts {
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub in_progress: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, Copy, Default, FromRow, Serialize)]
pub struct TaskCounts {
    pub open: i64,
    pub done: i64,
    pub overdue: i64,
}
