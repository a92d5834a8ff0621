//! Revenue entity model and DTOs.

use agencia_core::types::{Cents, Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `revenues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revenue {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub description: String,
    pub amount_cents: Cents,
    pub category: String,
    pub status: String,
    pub received_on: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRevenue {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 300, message = "description must be 1-300 characters"))]
    pub description: String,
    #[validate(range(min = 1, message = "amount_cents must be positive"))]
    pub amount_cents: Cents,
    /// Defaults to `services` if omitted.
    #[validate(length(min = 1, max = 60, message = "category must be 1-60 characters"))]
    pub category: Option<String>,
    /// Defaults to `received` if omitted.
    #[validate(custom(function = "agencia_core::validation::revenue_status"))]
    pub status: Option<String>,
    pub received_on: Date,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRevenue {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 300, message = "description must be 1-300 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "amount_cents must be positive"))]
    pub amount_cents: Option<Cents>,
    #[validate(length(min = 1, max = 60, message = "category must be 1-60 characters"))]
    pub category: Option<String>,
    #[validate(custom(function = "agencia_core::validation::revenue_status"))]
    pub status: Option<String>,
    pub received_on: Option<Date>,
}

/// `GET /revenues` filters. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevenueFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
}
