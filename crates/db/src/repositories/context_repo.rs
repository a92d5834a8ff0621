//! Read models feeding the AI assistants' context block.
//!
//! Each method fills one [`AgencyContext`](agencia_core::context::AgencyContext)
//! section and is independent of the others, so callers can run them
//! concurrently.

use agencia_core::context::{
    AgencySnapshot, ClientDetail, ClientLine, FinanceSnapshot, ProjectDetail, ProjectLine,
    TaskLine, TaskSnapshot, MAX_ROWS_PER_SECTION,
};
use agencia_core::finance::MonthWindow;
use agencia_core::types::{Cents, Date, DbId};
use agencia_core::vocab::{REVENUE_PENDING, REVENUE_RECEIVED, TASK_DONE};
use sqlx::PgPool;

use crate::models::dashboard::TaskCounts;
use crate::repositories::{DashboardRepo, RevenueRepo};

/// Upper bound on rows loaded for list sections. Rendering shows fewer
/// but reports the full count.
const MAX_ROWS_LOADED: i64 = 500;

type ClientRow = (String, Option<String>, String, Option<Cents>);
type ProjectRow = (String, String, String, Option<Cents>, Option<Date>);
type TaskRow = (String, String, String, Option<Date>);

pub struct ContextRepo;

impl ContextRepo {
    /// Agency name, plan and headline counts. `None` if the agency is gone.
    pub async fn agency(
        pool: &PgPool,
        agency_id: DbId,
    ) -> Result<Option<AgencySnapshot>, sqlx::Error> {
        let row: Option<(String, String, i64, i64, i64)> = sqlx::query_as(
            "SELECT a.name, a.plan, \
                    (SELECT COUNT(*) FROM clients WHERE agency_id = a.id), \
                    (SELECT COUNT(*) FROM projects WHERE agency_id = a.id), \
                    (SELECT COUNT(*) FROM users WHERE agency_id = a.id AND is_active) \
             FROM agencies a WHERE a.id = $1",
        )
        .bind(agency_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(
            |(name, plan, client_count, project_count, member_count)| AgencySnapshot {
                name,
                plan,
                client_count,
                project_count,
                member_count,
            },
        ))
    }

    pub async fn clients(pool: &PgPool, agency_id: DbId) -> Result<Vec<ClientLine>, sqlx::Error> {
        let rows: Vec<ClientRow> = sqlx::query_as(
            "SELECT name, company, status, monthly_fee_cents FROM clients \
             WHERE agency_id = $1 ORDER BY name, id LIMIT $2",
        )
        .bind(agency_id)
        .bind(MAX_ROWS_LOADED)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(client_line).collect())
    }

    pub async fn projects(pool: &PgPool, agency_id: DbId) -> Result<Vec<ProjectLine>, sqlx::Error> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT p.name, c.name, p.status, p.budget_cents, p.end_date \
             FROM projects p JOIN clients c ON c.id = p.client_id \
             WHERE p.agency_id = $1 ORDER BY p.created_at DESC, p.id DESC LIMIT $2",
        )
        .bind(agency_id)
        .bind(MAX_ROWS_LOADED)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(project_line).collect())
    }

    /// Current-month and previous-month totals around `today`.
    pub async fn finances(
        pool: &PgPool,
        agency_id: DbId,
        today: Date,
    ) -> Result<FinanceSnapshot, sqlx::Error> {
        let month = MonthWindow::containing(today);
        let previous = month.previous();

        let (
            revenue_month_cents,
            revenue_previous_cents,
            expense_month_cents,
            expense_previous_cents,
            pending_revenue_cents,
        ): (Cents, Cents, Cents, Cents, Cents) = sqlx::query_as(
            "SELECT \
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM revenues \
                   WHERE agency_id = $1 AND status = $6 AND received_on >= $2 AND received_on < $3), \
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM revenues \
                   WHERE agency_id = $1 AND status = $6 AND received_on >= $4 AND received_on < $5), \
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM expenses \
                   WHERE agency_id = $1 AND spent_on >= $2 AND spent_on < $3), \
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM expenses \
                   WHERE agency_id = $1 AND spent_on >= $4 AND spent_on < $5), \
                (SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM revenues \
                   WHERE agency_id = $1 AND status = $7)",
        )
        .bind(agency_id)
        .bind(month.start)
        .bind(month.end)
        .bind(previous.start)
        .bind(previous.end)
        .bind(REVENUE_RECEIVED)
        .bind(REVENUE_PENDING)
        .fetch_one(pool)
        .await?;

        Ok(FinanceSnapshot {
            revenue_month_cents,
            revenue_previous_cents,
            expense_month_cents,
            expense_previous_cents,
            pending_revenue_cents,
        })
    }

    /// Task counts plus the nearest open deadlines from `today` on.
    pub async fn tasks(
        pool: &PgPool,
        agency_id: DbId,
        today: Date,
    ) -> Result<TaskSnapshot, sqlx::Error> {
        let TaskCounts {
            open,
            done,
            overdue,
        } = DashboardRepo::task_counts(pool, agency_id, today).await?;

        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT title, status, priority, due_date FROM tasks \
             WHERE agency_id = $1 AND status <> $2 AND due_date >= $3 \
             ORDER BY due_date, id LIMIT $4",
        )
        .bind(agency_id)
        .bind(TASK_DONE)
        .bind(today)
        .bind(MAX_ROWS_PER_SECTION as i64)
        .fetch_all(pool)
        .await?;

        Ok(TaskSnapshot {
            open,
            overdue,
            done,
            upcoming: rows.into_iter().map(task_line).collect(),
        })
    }

    /// One client with its projects and lifetime received revenue.
    pub async fn client_detail(
        pool: &PgPool,
        agency_id: DbId,
        client_id: DbId,
    ) -> Result<Option<ClientDetail>, sqlx::Error> {
        let row: Option<(String, Option<String>, String, Option<Cents>, Option<String>, Option<String>)> =
            sqlx::query_as(
                "SELECT name, company, status, monthly_fee_cents, email, notes FROM clients \
                 WHERE id = $1 AND agency_id = $2",
            )
            .bind(client_id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await?;

        let Some((name, company, status, monthly_fee_cents, email, notes)) = row else {
            return Ok(None);
        };

        let projects: Vec<ProjectRow> = sqlx::query_as(
            "SELECT p.name, c.name, p.status, p.budget_cents, p.end_date \
             FROM projects p JOIN clients c ON c.id = p.client_id \
             WHERE p.agency_id = $1 AND p.client_id = $2 \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $3",
        )
        .bind(agency_id)
        .bind(client_id)
        .bind(MAX_ROWS_LOADED)
        .fetch_all(pool)
        .await?;

        let revenue_total_cents =
            RevenueRepo::sum_received_for_client(pool, agency_id, client_id).await?;

        Ok(Some(ClientDetail {
            client: client_line((name, company, status, monthly_fee_cents)),
            email,
            notes,
            projects: projects.into_iter().map(project_line).collect(),
            revenue_total_cents,
        }))
    }

    /// One project with its tasks in board order.
    pub async fn project_detail(
        pool: &PgPool,
        agency_id: DbId,
        project_id: DbId,
    ) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let row: Option<(String, String, String, Option<Cents>, Option<Date>, Option<String>)> =
            sqlx::query_as(
                "SELECT p.name, c.name, p.status, p.budget_cents, p.end_date, p.description \
                 FROM projects p JOIN clients c ON c.id = p.client_id \
                 WHERE p.id = $1 AND p.agency_id = $2",
            )
            .bind(project_id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await?;

        let Some((name, client_name, status, budget_cents, end_date, description)) = row else {
            return Ok(None);
        };

        let tasks: Vec<TaskRow> = sqlx::query_as(
            "SELECT title, status, priority, due_date FROM tasks \
             WHERE agency_id = $1 AND project_id = $2 \
             ORDER BY status, position, id LIMIT $3",
        )
        .bind(agency_id)
        .bind(project_id)
        .bind(MAX_ROWS_LOADED)
        .fetch_all(pool)
        .await?;

        Ok(Some(ProjectDetail {
            project: project_line((name, client_name, status, budget_cents, end_date)),
            description,
            tasks: tasks.into_iter().map(task_line).collect(),
        }))
    }
}

fn client_line((name, company, status, monthly_fee_cents): ClientRow) -> ClientLine {
    ClientLine {
        name,
        company,
        status,
        monthly_fee_cents,
    }
}

fn project_line((name, client_name, status, budget_cents, end_date): ProjectRow) -> ProjectLine {
    ProjectLine {
        name,
        client_name,
        status,
        budget_cents,
        end_date,
    }
}

fn task_line((title, status, priority, due_date): TaskRow) -> TaskLine {
    TaskLine {
        title,
        status,
        priority,
        due_date,
    }
}
