//! Project entity model and DTOs.

use agencia_core::types::{Cents, Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `projects` table joined with its client's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub agency_id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub budget_cents: Option<Cents>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "create_dates_in_order"))]
pub struct CreateProject {
    pub client_id: DbId,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    /// Defaults to `planning` if omitted.
    #[validate(custom(function = "agencia_core::validation::project_status"))]
    pub status: Option<String>,
    #[validate(range(min = 0, message = "budget_cents must not be negative"))]
    pub budget_cents: Option<Cents>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// A date pair that becomes inverted only after merging with stored values
/// is rejected by the `ck_projects_dates` constraint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "update_dates_in_order"))]
pub struct UpdateProject {
    pub client_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "agencia_core::validation::project_status"))]
    pub status: Option<String>,
    #[validate(range(min = 0, message = "budget_cents must not be negative"))]
    pub budget_cents: Option<Cents>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

fn create_dates_in_order(input: &CreateProject) -> Result<(), ValidationError> {
    agencia_core::validation::date_range(input.start_date, input.end_date)
}

fn update_dates_in_order(input: &UpdateProject) -> Result<(), ValidationError> {
    agencia_core::validation::date_range(input.start_date, input.end_date)
}

/// `GET /projects` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<DbId>,
}
