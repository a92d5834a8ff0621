//! Aggregate counts for the dashboard. Money sums live on
//! [`RevenueRepo`](super::RevenueRepo) and [`ExpenseRepo`](super::ExpenseRepo).

use agencia_core::types::{Date, DbId};
use agencia_core::vocab::{CLIENT_ACTIVE, PROJECT_COMPLETED, PROJECT_IN_PROGRESS, TASK_DONE};
use sqlx::PgPool;

use crate::models::dashboard::{ClientCounts, ProjectCounts, TaskCounts};

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn client_counts(
        pool: &PgPool,
        agency_id: DbId,
    ) -> Result<ClientCounts, sqlx::Error> {
        sqlx::query_as::<_, ClientCounts>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = $2) AS active \
             FROM clients WHERE agency_id = $1",
        )
        .bind(agency_id)
        .bind(CLIENT_ACTIVE)
        .fetch_one(pool)
        .await
    }

    pub async fn project_counts(
        pool: &PgPool,
        agency_id: DbId,
    ) -> Result<ProjectCounts, sqlx::Error> {
        sqlx::query_as::<_, ProjectCounts>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = $2) AS in_progress, \
                    COUNT(*) FILTER (WHERE status = $3) AS completed \
             FROM projects WHERE agency_id = $1",
        )
        .bind(agency_id)
        .bind(PROJECT_IN_PROGRESS)
        .bind(PROJECT_COMPLETED)
        .fetch_one(pool)
        .await
    }

    /// Open, done, and overdue (open with `due_date` before `today`) tasks.
    pub async fn task_counts(
        pool: &PgPool,
        agency_id: DbId,
        today: Date,
    ) -> Result<TaskCounts, sqlx::Error> {
        sqlx::query_as::<_, TaskCounts>(
            "SELECT COUNT(*) FILTER (WHERE status <> $2) AS open, \
                    COUNT(*) FILTER (WHERE status = $2) AS done, \
                    COUNT(*) FILTER (WHERE status <> $2 AND due_date < $3) AS overdue \
             FROM tasks WHERE agency_id = $1",
        )
        .bind(agency_id)
        .bind(TASK_DONE)
        .bind(today)
        .fetch_one(pool)
        .await
    }
}
