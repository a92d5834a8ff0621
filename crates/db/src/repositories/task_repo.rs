//! Repository for the `tasks` table.
//!
//! Positions are dense per `(board_id, status)` column: `0..len`. Create
//! appends, delete closes the gap, and [`TaskRepo::move_to`] shifts the
//! neighbours in both columns inside one transaction.

use agencia_core::kanban::clamp_position;
use agencia_core::pagination::PageRequest;
use agencia_core::types::DbId;
use agencia_core::vocab::{PRIORITY_MEDIUM, TASK_TODO};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::task::{CreateTask, MoveTask, Task, TaskFilter, UpdateTask};
use crate::repositories::{contains_pattern, non_blank};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agency_id, board_id, project_id, assignee_id, title, description, \
     status, priority, position, due_date, created_at, updated_at";

/// Provides CRUD and ordering operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task at the end of its column.
    ///
    /// The caller must have checked that the board, project and assignee
    /// belong to `agency_id`. The board row is locked so concurrent inserts
    /// into one column get consecutive positions.
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or(TASK_TODO);
        let mut tx = pool.begin().await?;

        lock_board(&mut *tx, input.board_id).await?;

        let query = format!(
            "INSERT INTO tasks (agency_id, board_id, project_id, assignee_id, title, description, \
                                status, priority, position, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, \
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE board_id = $2 AND status = $7), \
                     $9) \
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(agency_id)
            .bind(input.board_id)
            .bind(input.project_id)
            .bind(input.assignee_id)
            .bind(input.title.trim())
            .bind(input.description.as_deref())
            .bind(status)
            .bind(input.priority.as_deref().unwrap_or(PRIORITY_MEDIUM))
            .bind(input.due_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(task)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// All tasks on one board, in column and position order.
    pub async fn list_by_board(
        pool: &PgPool,
        agency_id: DbId,
        board_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE board_id = $1 AND agency_id = $2 \
             ORDER BY status, position, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(board_id)
            .bind(agency_id)
            .fetch_all(pool)
            .await
    }

    /// One page of tasks ordered by due date (undated last), plus the total.
    pub async fn list(
        pool: &PgPool,
        agency_id: DbId,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> Result<(Vec<Task>, i64), sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filters(&mut count, agency_id, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM tasks"));
        push_filters(&mut select, agency_id, filter);
        select
            .push(" ORDER BY due_date ASC NULLS LAST, id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = select.build_query_as::<Task>().fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Edit task details. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                project_id = COALESCE($3, project_id), \
                assignee_id = COALESCE($4, assignee_id), \
                title = COALESCE($5, title), \
                description = COALESCE($6, description), \
                priority = COALESCE($7, priority), \
                due_date = COALESCE($8, due_date) \
             WHERE id = $1 AND agency_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(input.project_id)
            .bind(input.assignee_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.description.as_deref())
            .bind(input.priority.as_deref())
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Move a task to `status` at `position`, renumbering both columns.
    ///
    /// The requested position is clamped into the destination column.
    /// Returns `None` if the task does not exist in this agency.
    pub async fn move_to(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &MoveTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board_id: Option<DbId> =
            sqlx::query_scalar("SELECT board_id FROM tasks WHERE id = $1 AND agency_id = $2")
                .bind(id)
                .bind(agency_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(board_id) = board_id else {
            return Ok(None);
        };

        // Every position change on a board is serialised on the board row,
        // taken before any task row so writers cannot deadlock.
        lock_board(&mut *tx, board_id).await?;

        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let same_column = task.status == input.status;
        let column_len: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE board_id = $1 AND status = $2")
                .bind(task.board_id)
                .bind(&input.status)
                .fetch_one(&mut *tx)
                .await?;
        let position = clamp_position(input.position, column_len, same_column);

        close_gap(&mut *tx, task.board_id, &task.status, task.position, id).await?;

        sqlx::query(
            "UPDATE tasks SET position = position + 1 \
             WHERE board_id = $1 AND status = $2 AND position >= $3 AND id <> $4",
        )
        .bind(task.board_id)
        .bind(&input.status)
        .bind(position)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE tasks SET status = $2, position = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let moved = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(moved))
    }

    /// Delete a task and close the gap it leaves in its column.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board_id: Option<DbId> =
            sqlx::query_scalar("SELECT board_id FROM tasks WHERE id = $1 AND agency_id = $2")
                .bind(id)
                .bind(agency_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(board_id) = board_id else {
            return Ok(false);
        };
        lock_board(&mut *tx, board_id).await?;

        // Re-read under the lock: a concurrent move may have changed the
        // column or position, or a concurrent delete removed the row.
        let removed: Option<(String, i32)> = sqlx::query_as(
            "DELETE FROM tasks WHERE id = $1 AND agency_id = $2 RETURNING status, position",
        )
        .bind(id)
        .bind(agency_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((status, position)) = removed else {
            return Ok(false);
        };
        close_gap(&mut *tx, board_id, &status, position, id).await?;

        tx.commit().await?;
        Ok(true)
    }
}

/// Take the row lock that serialises position changes on one board.
async fn lock_board(conn: &mut PgConnection, board_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
        .bind(board_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Shift every task after `position` in a column one slot up.
async fn close_gap(
    conn: &mut PgConnection,
    board_id: DbId,
    status: &str,
    position: i32,
    except_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tasks SET position = position - 1 \
         WHERE board_id = $1 AND status = $2 AND position > $3 AND id <> $4",
    )
    .bind(board_id)
    .bind(status)
    .bind(position)
    .bind(except_id)
    .execute(conn)
    .await?;
    Ok(())
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, agency_id: DbId, filter: &TaskFilter) {
    qb.push(" WHERE agency_id = ").push_bind(agency_id);
    if let Some(board_id) = filter.board_id {
        qb.push(" AND board_id = ").push_bind(board_id);
    }
    if let Some(project_id) = filter.project_id {
        qb.push(" AND project_id = ").push_bind(project_id);
    }
    if let Some(assignee_id) = filter.assignee_id {
        qb.push(" AND assignee_id = ").push_bind(assignee_id);
    }
    if let Some(status) = non_blank(&filter.status) {
        qb.push(" AND status = ").push_bind(status.to_string());
    }
    if let Some(search) = non_blank(&filter.search) {
        let pattern = contains_pattern(search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
