//! Kanban board entity model and DTOs.

use agencia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub agency_id: DbId,
    pub project_id: Option<DbId>,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBoard {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    pub project_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBoard {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    pub project_id: Option<DbId>,
}
