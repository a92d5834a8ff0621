//! Kanban column grouping and position arithmetic.

use serde::Serialize;

use crate::vocab::TASK_COLUMNS;

/// Anything that can be placed on a board column.
pub trait BoardItem {
    fn status(&self) -> &str;
    fn position(&self) -> i32;
}

/// One board column with its tasks in display order.
#[derive(Debug, Serialize)]
pub struct Column<T: Serialize> {
    pub status: &'static str,
    pub tasks: Vec<T>,
}

/// Group tasks into the fixed column order, sorting each column by position.
///
/// Every column is present in the output even when empty.
pub fn group_into_columns<T: BoardItem + Serialize>(tasks: Vec<T>) -> Vec<Column<T>> {
    let mut columns: Vec<Column<T>> = TASK_COLUMNS
        .iter()
        .map(|&status| Column {
            status,
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks {
        if let Some(col) = columns.iter_mut().find(|c| c.status == task.status()) {
            col.tasks.push(task);
        }
    }

    for col in &mut columns {
        col.tasks.sort_by_key(|t| t.position());
    }
    columns
}

/// Clamp a requested drop position into the destination column.
///
/// `column_len` counts the tasks currently in the destination column,
/// including the moving task when it stays in the same column. A task
/// moving to another column may land after the last item; one staying in
/// its column can at most take the last slot.
pub fn clamp_position(requested: i32, column_len: i64, same_column: bool) -> i32 {
    let max = if same_column {
        (column_len - 1).max(0)
    } else {
        column_len.max(0)
    };
    let max = i32::try_from(max).unwrap_or(i32::MAX);
    requested.clamp(0, max)
}
