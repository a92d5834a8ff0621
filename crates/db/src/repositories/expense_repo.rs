//! Repository for the `expenses` table.

use agencia_core::finance::MonthWindow;
use agencia_core::pagination::PageRequest;
use agencia_core::types::{Cents, DbId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::expense::{CreateExpense, Expense, ExpenseFilter, UpdateExpense};
use crate::repositories::non_blank;

const COLUMNS: &str = "id, agency_id, client_id, project_id, description, amount_cents, category, \
     spent_on, created_at, updated_at";

pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert an expense. `category` defaults to `general`.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateExpense,
    ) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (agency_id, client_id, project_id, description, amount_cents, \
                                   category, spent_on) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'general'), $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.description.trim())
            .bind(input.amount_cents)
            .bind(input.category.as_deref().map(str::trim))
            .bind(input.spent_on)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
        filter: &ExpenseFilter,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM expenses");
        push_filters(&mut count, agency_id, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM expenses"));
        push_filters(&mut select, agency_id, filter);
        select
            .push(" ORDER BY spent_on DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select.build_query_as::<Expense>().fetch_all(pool).await?;

        Ok((rows, total))
    }

    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET \
                client_id = COALESCE($3, client_id), \
                project_id = COALESCE($4, project_id), \
                description = COALESCE($5, description), \
                amount_cents = COALESCE($6, amount_cents), \
                category = COALESCE($7, category), \
                spent_on = COALESCE($8, spent_on) \
             WHERE id = $1 AND agency_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.description.as_deref().map(str::trim))
            .bind(input.amount_cents)
            .bind(input.category.as_deref().map(str::trim))
            .bind(input.spent_on)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Expenses dated inside `window`.
    pub async fn sum_in(
        pool: &PgPool,
        agency_id: DbId,
        window: MonthWindow,
    ) -> Result<Cents, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM expenses \
             WHERE agency_id = $1 AND spent_on >= $2 AND spent_on < $3",
        )
        .bind(agency_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, agency_id: DbId, filter: &ExpenseFilter) {
    qb.push(" WHERE agency_id = ").push_bind(agency_id);
    if let Some(from) = filter.from {
        qb.push(" AND spent_on >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND spent_on <= ").push_bind(to);
    }
    if let Some(category) = non_blank(&filter.category) {
        qb.push(" AND category = ").push_bind(category.to_string());
    }
    if let Some(client_id) = filter.client_id {
        qb.push(" AND client_id = ").push_bind(client_id);
    }
    if let Some(project_id) = filter.project_id {
        qb.push(" AND project_id = ").push_bind(project_id);
    }
}
