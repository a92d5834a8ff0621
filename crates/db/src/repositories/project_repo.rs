//! Repository for the `projects` table.

use agencia_core::pagination::PageRequest;
use agencia_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::repositories::{contains_pattern, non_blank};

/// Projected columns; every query aliases the project as `p` and joins its
/// client as `c`.
const COLUMNS: &str = "p.id, p.agency_id, p.client_id, c.name AS client_name, p.name, \
     p.description, p.status, p.budget_cents, p.start_date, p.end_date, p.created_at, p.updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project. `status` defaults to `planning`.
    ///
    /// The caller must have checked that `client_id` belongs to `agency_id`.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "WITH p AS ( \
                INSERT INTO projects (agency_id, client_id, name, description, status, budget_cents, start_date, end_date) \
                VALUES ($1, $2, $3, $4, COALESCE($5, 'planning'), $6, $7, $8) \
                RETURNING * \
             ) \
             SELECT {COLUMNS} FROM p JOIN clients c ON c.id = p.client_id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.name.trim())
            .bind(input.description.as_deref())
            .bind(input.status.as_deref())
            .bind(input.budget_cents)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p JOIN clients c ON c.id = p.client_id \
             WHERE p.id = $1 AND p.agency_id = $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of projects, most recently created first, plus the total.
    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM projects p JOIN clients c ON c.id = p.client_id",
        );
        push_filters(&mut count, agency_id, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM projects p JOIN clients c ON c.id = p.client_id"
        ));
        push_filters(&mut select, agency_id, filter);
        select
            .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select.build_query_as::<Project>().fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "WITH p AS ( \
                UPDATE projects SET \
                    client_id = COALESCE($3, client_id), \
                    name = COALESCE($4, name), \
                    description = COALESCE($5, description), \
                    status = COALESCE($6, status), \
                    budget_cents = COALESCE($7, budget_cents), \
                    start_date = COALESCE($8, start_date), \
                    end_date = COALESCE($9, end_date) \
                WHERE id = $1 AND agency_id = $2 \
                RETURNING * \
             ) \
             SELECT {COLUMNS} FROM p JOIN clients c ON c.id = p.client_id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(input.client_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.description.as_deref())
            .bind(input.status.as_deref())
            .bind(input.budget_cents)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, agency_id: DbId, filter: &ProjectFilter) {
    qb.push(" WHERE p.agency_id = ").push_bind(agency_id);
    if let Some(status) = non_blank(&filter.status) {
        qb.push(" AND p.status = ").push_bind(status.to_string());
    }
    if let Some(client_id) = filter.client_id {
        qb.push(" AND p.client_id = ").push_bind(client_id);
    }
    if let Some(search) = non_blank(&filter.search) {
        let pattern = contains_pattern(search);
        qb.push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
