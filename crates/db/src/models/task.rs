//! Task entity model and DTOs.

use agencia_core::kanban::BoardItem;
use agencia_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub agency_id: DbId,
    pub board_id: DbId,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub position: i32,
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BoardItem for Task {
    fn status(&self) -> &str {
        &self.status
    }

    fn position(&self) -> i32 {
        self.position
    }
}

/// DTO for creating a task. It is appended to the end of its column.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub board_id: DbId,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    /// Defaults to `todo` if omitted.
    #[validate(custom(function = "agencia_core::validation::task_status"))]
    pub status: Option<String>,
    /// Defaults to `medium` if omitted.
    #[validate(custom(function = "agencia_core::validation::task_priority"))]
    pub priority: Option<String>,
    pub due_date: Option<Date>,
}

/// DTO for editing task details. Column and position change through
/// [`MoveTask`] only.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "agencia_core::validation::task_priority"))]
    pub priority: Option<String>,
    pub due_date: Option<Date>,
}

/// DTO for `PATCH /tasks/{id}/move`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoveTask {
    #[validate(custom(function = "agencia_core::validation::task_status"))]
    pub status: String,
    pub position: i32,
}

/// `GET /tasks` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub board_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub assignee_id: Option<DbId>,
    pub search: Option<String>,
}
