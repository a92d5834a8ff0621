//! Agency (tenant) entity model and DTOs.

use agencia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `agencies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Agency {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub plan: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload. The slug is derived by the caller.
#[derive(Debug, Clone)]
pub struct CreateAgency {
    pub name: String,
    pub slug: String,
}

/// DTO for updating agency settings. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAgency {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "agencia_core::validation::plan"))]
    pub plan: Option<String>,
}
