//! Handler for `/dashboard/stats`.

use agencia_core::finance::{percent_change, MonthWindow};
use agencia_core::types::{Cents, Date, Timestamp};
use agencia_db::models::dashboard::{ClientCounts, ProjectCounts, TaskCounts};
use agencia_db::repositories::{AiUsageRepo, DashboardRepo, ExpenseRepo, RevenueRepo};
use axum::extract::State;
use axum::Json;
use chrono::NaiveTime;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Current vs previous calendar month for one money series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthComparison {
    pub current_month_cents: Cents,
    pub previous_month_cents: Cents,
    pub change_pct: f64,
}

impl MonthComparison {
    pub fn new(current: Cents, previous: Cents) -> Self {
        Self {
            current_month_cents: current,
            previous_month_cents: previous,
            change_pct: percent_change(current, previous),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub clients: ClientCounts,
    pub projects: ProjectCounts,
    pub tasks: TaskCounts,
    /// Received revenue only.
    pub revenue: MonthComparison,
    pub expenses: MonthComparison,
    /// Current-month received revenue minus current-month expenses.
    pub profit_cents: Cents,
    /// All revenue still marked `pending`, regardless of date.
    pub pending_revenue_cents: Cents,
    pub ai_requests_month: i64,
}

/// GET /api/dashboard/stats
///
/// All aggregates are independent reads and run concurrently.
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let pool = &state.pool;
    let agency_id = auth.agency_id;
    let today = chrono::Utc::now().date_naive();
    let month = MonthWindow::containing(today);
    let previous = month.previous();

    let (
        clients,
        projects,
        tasks,
        revenue_now,
        revenue_before,
        expense_now,
        expense_before,
        pending,
        ai_requests,
    ) = tokio::try_join!(
        DashboardRepo::client_counts(pool, agency_id),
        DashboardRepo::project_counts(pool, agency_id),
        DashboardRepo::task_counts(pool, agency_id, today),
        RevenueRepo::sum_received_in(pool, agency_id, month),
        RevenueRepo::sum_received_in(pool, agency_id, previous),
        ExpenseRepo::sum_in(pool, agency_id, month),
        ExpenseRepo::sum_in(pool, agency_id, previous),
        RevenueRepo::sum_pending(pool, agency_id),
        AiUsageRepo::count_since(pool, agency_id, month_start(month.start)),
    )?;

    Ok(Json(DashboardStats {
        clients,
        projects,
        tasks,
        revenue: MonthComparison::new(revenue_now, revenue_before),
        expenses: MonthComparison::new(expense_now, expense_before),
        profit_cents: revenue_now - expense_now,
        pending_revenue_cents: pending,
        ai_requests_month: ai_requests,
    }))
}

/// Midnight UTC at the start of `day`.
pub(crate) fn month_start(day: Date) -> Timestamp {
    day.and_time(NaiveTime::MIN).and_utc()
}
