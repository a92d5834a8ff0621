//! Repository for the `revenues` table.

use agencia_core::finance::MonthWindow;
use agencia_core::pagination::PageRequest;
use agencia_core::types::{Cents, DbId};
use agencia_core::vocab::{REVENUE_PENDING, REVENUE_RECEIVED};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::revenue::{CreateRevenue, Revenue, RevenueFilter, UpdateRevenue};
use crate::repositories::non_blank;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agency_id, client_id, project_id, description, amount_cents, category, \
     status, received_on, created_at, updated_at";

/// Provides CRUD and aggregate operations for revenues.
pub struct RevenueRepo;

impl RevenueRepo {
    /// Insert a revenue. `category` defaults to `services`, `status` to
    /// `received`.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateRevenue,
    ) -> Result<Revenue, sqlx::Error> {
        let query = format!(
            "INSERT INTO revenues (agency_id, client_id, project_id, description, amount_cents, \
                                   category, status, received_on) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'services'), COALESCE($7, 'received'), $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revenue>(&query)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.description.trim())
            .bind(input.amount_cents)
            .bind(input.category.as_deref().map(str::trim))
            .bind(input.status.as_deref())
            .bind(input.received_on)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Revenue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revenues WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Revenue>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of revenues, newest first, plus the total match count.
    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
        filter: &RevenueFilter,
        page: PageRequest,
    ) -> Result<(Vec<Revenue>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM revenues");
        push_filters(&mut count, agency_id, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM revenues"));
        push_filters(&mut select, agency_id, filter);
        select
            .push(" ORDER BY received_on DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select.build_query_as::<Revenue>().fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Update a revenue. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateRevenue,
    ) -> Result<Option<Revenue>, sqlx::Error> {
        let query = format!(
            "UPDATE revenues SET \
                client_id = COALESCE($3, client_id), \
                project_id = COALESCE($4, project_id), \
                description = COALESCE($5, description), \
                amount_cents = COALESCE($6, amount_cents), \
                category = COALESCE($7, category), \
                status = COALESCE($8, status), \
                received_on = COALESCE($9, received_on) \
             WHERE id = $1 AND agency_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revenue>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.description.as_deref().map(str::trim))
            .bind(input.amount_cents)
            .bind(input.category.as_deref().map(str::trim))
            .bind(input.status.as_deref())
            .bind(input.received_on)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revenues WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Received revenue dated inside `window`.
    pub async fn sum_received_in(
        pool: &PgPool,
        agency_id: DbId,
        window: MonthWindow,
    ) -> Result<Cents, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM revenues \
             WHERE agency_id = $1 AND status = $2 AND received_on >= $3 AND received_on < $4",
        )
        .bind(agency_id)
        .bind(REVENUE_RECEIVED)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await
    }

    /// All revenue still awaiting payment, regardless of date.
    pub async fn sum_pending(pool: &PgPool, agency_id: DbId) -> Result<Cents, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM revenues \
             WHERE agency_id = $1 AND status = $2",
        )
        .bind(agency_id)
        .bind(REVENUE_PENDING)
        .fetch_one(pool)
        .await
    }

    /// Lifetime received revenue attributed to one client.
    pub async fn sum_received_for_client(
        pool: &PgPool,
        agency_id: DbId,
        client_id: DbId,
    ) -> Result<Cents, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM revenues \
             WHERE agency_id = $1 AND client_id = $2 AND status = $3",
        )
        .bind(agency_id)
        .bind(client_id)
        .bind(REVENUE_RECEIVED)
        .fetch_one(pool)
        .await
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, agency_id: DbId, filter: &RevenueFilter) {
    qb.push(" WHERE agency_id = ").push_bind(agency_id);
    if let Some(from) = filter.from {
        qb.push(" AND received_on >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND received_on <= ").push_bind(to);
    }
    if let Some(category) = non_blank(&filter.category) {
        qb.push(" AND category = ").push_bind(category.to_string());
    }
    if let Some(status) = non_blank(&filter.status) {
        qb.push(" AND status = ").push_bind(status.to_string());
    }
    if let Some(client_id) = filter.client_id {
        qb.push(" AND client_id = ").push_bind(client_id);
    }
    if let Some(project_id) = filter.project_id {
        qb.push(" AND project_id = ").push_bind(project_id);
    }
}
