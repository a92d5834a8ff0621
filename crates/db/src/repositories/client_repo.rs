//! Repository for the `clients` table.

use agencia_core::pagination::PageRequest;
use agencia_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::client::{Client, ClientFilter, CreateClient, UpdateClient};
use crate::repositories::{contains_pattern, non_blank};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agency_id, name, email, phone, company, status, monthly_fee_cents, \
     notes, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client. `status` defaults to `active`.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (agency_id, name, email, phone, company, status, monthly_fee_cents, notes) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active'), $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(agency_id)
            .bind(input.name.trim())
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.company.as_deref())
            .bind(input.status.as_deref())
            .bind(input.monthly_fee_cents)
            .bind(input.notes.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of clients ordered by name, plus the total match count.
    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
        filter: &ClientFilter,
        page: PageRequest,
    ) -> Result<(Vec<Client>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM clients");
        push_filters(&mut count, agency_id, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM clients"));
        push_filters(&mut select, agency_id, filter);
        select
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select.build_query_as::<Client>().fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET \
                name = COALESCE($3, name), \
                email = COALESCE($4, email), \
                phone = COALESCE($5, phone), \
                company = COALESCE($6, company), \
                status = COALESCE($7, status), \
                monthly_fee_cents = COALESCE($8, monthly_fee_cents), \
                notes = COALESCE($9, notes) \
             WHERE id = $1 AND agency_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.company.as_deref())
            .bind(input.status.as_deref())
            .bind(input.monthly_fee_cents)
            .bind(input.notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a client. Fails with a foreign-key violation while projects
    /// still reference it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, agency_id: DbId, filter: &ClientFilter) {
    qb.push(" WHERE agency_id = ").push_bind(agency_id);
    if let Some(status) = non_blank(&filter.status) {
        qb.push(" AND status = ").push_bind(status.to_string());
    }
    if let Some(search) = non_blank(&filter.search) {
        let pattern = contains_pattern(search);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR company ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
