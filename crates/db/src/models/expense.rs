//! Expense entity model and DTOs.

use agencia_core::types::{Cents, Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub description: String,
    pub amount_cents: Cents,
    pub category: String,
    pub spent_on: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 300, message = "description must be 1-300 characters"))]
    pub description: String,
    #[validate(range(min = 1, message = "amount_cents must be positive"))]
    pub amount_cents: Cents,
    /// Defaults to `general` if omitted.
    #[validate(length(min = 1, max = 60, message = "category must be 1-60 characters"))]
    pub category: Option<String>,
    pub spent_on: Date,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpense {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 300, message = "description must be 1-300 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "amount_cents must be positive"))]
    pub amount_cents: Option<Cents>,
    #[validate(length(min = 1, max = 60, message = "category must be 1-60 characters"))]
    pub category: Option<String>,
    pub spent_on: Option<Date>,
}

/// `GET /expenses` filters. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub category: Option<String>,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
}
