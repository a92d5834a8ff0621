//! Client entity model and DTOs.

use agencia_core::types::{Cents, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub agency_id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub monthly_fee_cents: Option<Cents>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "phone must be at most 40 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "company must be at most 200 characters"))]
    pub company: Option<String>,
    /// Defaults to `active` if omitted.
    #[validate(custom(function = "agencia_core::validation::client_status"))]
    pub status: Option<String>,
    #[validate(range(min = 0, message = "monthly_fee_cents must not be negative"))]
    pub monthly_fee_cents: Option<Cents>,
    #[validate(length(max = 5000, message = "notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

/// DTO for updating an existing client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClient {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(max = 40, message = "phone must be at most 40 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "company must be at most 200 characters"))]
    pub company: Option<String>,
    #[validate(custom(function = "agencia_core::validation::client_status"))]
    pub status: Option<String>,
    #[validate(range(min = 0, message = "monthly_fee_cents must not be negative"))]
    pub monthly_fee_cents: Option<Cents>,
    #[validate(length(max = 5000, message = "notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

/// `GET /clients` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFilter {
    /// Case-insensitive match on name, company or email.
    pub search: Option<String>,
    pub status: Option<String>,
}
