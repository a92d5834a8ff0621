//! Repository for the `agencies` table.

use agencia_core::types::DbId;
use sqlx::PgPool;

use crate::models::agency::{Agency, CreateAgency, UpdateAgency};
use crate::models::user::{CreateUser, User};
use crate::repositories::user_repo::COLUMNS as USER_COLUMNS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, plan, created_at, updated_at";

/// Provides operations on tenants.
pub struct AgencyRepo;

impl AgencyRepo {
    /// Create an agency together with its owner account in one transaction.
    pub async fn create_with_owner(
        pool: &PgPool,
        agency: &CreateAgency,
        owner: &CreateUser,
    ) -> Result<(Agency, User), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO agencies (name, slug) VALUES ($1, $2) RETURNING {COLUMNS}");
        let created = sqlx::query_as::<_, Agency>(&query)
            .bind(&agency.name)
            .bind(&agency.slug)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO users (agency_id, name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(created.id)
            .bind(&owner.name)
            .bind(&owner.email)
            .bind(&owner.password_hash)
            .bind(&owner.role)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((created, user))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Agency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agencies WHERE id = $1");
        sqlx::query_as::<_, Agency>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM agencies WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    /// Update an agency. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAgency,
    ) -> Result<Option<Agency>, sqlx::Error> {
        let query = format!(
            "UPDATE agencies SET \
                name = COALESCE($2, name), \
                plan = COALESCE($3, plan) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agency>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.plan.as_deref())
            .fetch_optional(pool)
            .await
    }
}
