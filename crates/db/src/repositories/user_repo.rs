//! Repository for the `users` table.

use agencia_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, agency_id, name, email, password_hash, role, is_active, \
     last_login_at, created_at, updated_at";

/// Provides operations on agency members.
pub struct UserRepo;

impl UserRepo {
    /// Look a user up by e-mail across all agencies. Used only by login.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// All members of an agency, oldest first.
    pub async fn list(pool: &PgPool, agency_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE agency_id = $1 ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .bind(agency_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (agency_id, name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(agency_id)
            .bind(&input.name)
            .bind(input.email.trim())
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Deactivate a member. Returns `true` if an active row was changed.
    pub async fn deactivate(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE WHERE id = $1 AND agency_id = $2 AND is_active",
        )
        .bind(id)
        .bind(agency_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `Some(is_active)` for a member of the agency, `None` if no such user.
    pub async fn is_active(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
