//! Task ordering on boards: append on create, gap closing on delete, and
//! moves within and across columns.

use agencia_core::roles::ROLE_OWNER;
use agencia_db::models::agency::CreateAgency;
use agencia_db::models::board::CreateBoard;
use agencia_db::models::task::{CreateTask, MoveTask};
use agencia_db::models::user::CreateUser;
use agencia_db::repositories::{AgencyRepo, BoardRepo, TaskRepo};
use sqlx::PgPool;

async fn setup(pool: &PgPool) -> (i64, i64) {
    let agency = CreateAgency {
        name: "Kanban Co".to_string(),
        slug: "kanban-co".to_string(),
    };
    let owner = CreateUser {
        name: "Owner".to_string(),
        email: "owner@kanban.test".to_string(),
        password_hash: "x".to_string(),
        role: ROLE_OWNER.to_string(),
    };
    let (agency, _) = AgencyRepo::create_with_owner(pool, &agency, &owner)
        .await
        .unwrap();
    let board = BoardRepo::create(
        pool,
        agency.id,
        &CreateBoard {
            name: "Sprint".to_string(),
            project_id: None,
        },
    )
    .await
    .unwrap();
    (agency.id, board.id)
}

async fn add(pool: &PgPool, agency: i64, board: i64, title: &str, status: &str) -> i64 {
    let input = CreateTask {
        board_id: board,
        project_id: None,
        assignee_id: None,
        title: title.to_string(),
        description: None,
        status: Some(status.to_string()),
        priority: None,
        due_date: None,
    };
    TaskRepo::create(pool, agency, &input).await.unwrap().id
}

/// Titles of one column in position order, asserting positions are dense.
async fn column(pool: &PgPool, agency: i64, board: i64, status: &str) -> Vec<String> {
    let mut tasks: Vec<_> = TaskRepo::list_by_board(pool, agency, board)
        .await
        .unwrap()
        .into_iter()
        .filter(|t| t.status == status)
        .collect();
    tasks.sort_by_key(|t| t.position);
    for (i, t) in tasks.iter().enumerate() {
        assert_eq!(t.position, i as i32, "{status} positions must be contiguous");
    }
    tasks.into_iter().map(|t| t.title).collect()
}

fn to(status: &str, position: i32) -> MoveTask {
    MoveTask {
        status: status.to_string(),
        position,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_appends_to_column(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    add(&pool, agency, board, "a", "todo").await;
    add(&pool, agency, board, "b", "todo").await;
    add(&pool, agency, board, "x", "done").await;

    assert_eq!(column(&pool, agency, board, "todo").await, vec!["a", "b"]);
    assert_eq!(column(&pool, agency, board, "done").await, vec!["x"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_within_column(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    let a = add(&pool, agency, board, "a", "todo").await;
    add(&pool, agency, board, "b", "todo").await;
    let c = add(&pool, agency, board, "c", "todo").await;

    TaskRepo::move_to(&pool, agency, a, &to("todo", 2)).await.unwrap();
    assert_eq!(column(&pool, agency, board, "todo").await, vec!["b", "c", "a"]);

    TaskRepo::move_to(&pool, agency, c, &to("todo", 0)).await.unwrap();
    assert_eq!(column(&pool, agency, board, "todo").await, vec!["c", "b", "a"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_across_columns_renumbers_both(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    add(&pool, agency, board, "a", "todo").await;
    let b = add(&pool, agency, board, "b", "todo").await;
    add(&pool, agency, board, "c", "todo").await;
    add(&pool, agency, board, "x", "review").await;

    let moved = TaskRepo::move_to(&pool, agency, b, &to("review", 0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.status, "review");
    assert_eq!(moved.position, 0);

    assert_eq!(column(&pool, agency, board, "todo").await, vec!["a", "c"]);
    assert_eq!(column(&pool, agency, board, "review").await, vec!["b", "x"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_clamps_position(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    let a = add(&pool, agency, board, "a", "todo").await;
    add(&pool, agency, board, "x", "done").await;

    let moved = TaskRepo::move_to(&pool, agency, a, &to("done", 99))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.position, 1);

    let moved = TaskRepo::move_to(&pool, agency, a, &to("done", -5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.position, 0);
    assert_eq!(column(&pool, agency, board, "done").await, vec!["a", "x"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_closes_gap(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    add(&pool, agency, board, "a", "todo").await;
    let b = add(&pool, agency, board, "b", "todo").await;
    add(&pool, agency, board, "c", "todo").await;

    assert!(TaskRepo::delete(&pool, agency, b).await.unwrap());
    assert_eq!(column(&pool, agency, board, "todo").await, vec!["a", "c"]);

    let next = add(&pool, agency, board, "d", "todo").await;
    let task = TaskRepo::find_by_id(&pool, agency, next).await.unwrap().unwrap();
    assert_eq!(task.position, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_moving_foreign_task_is_not_found(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    let a = add(&pool, agency, board, "a", "todo").await;

    let result = TaskRepo::move_to(&pool, agency + 1000, a, &to("done", 0))
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(column(&pool, agency, board, "todo").await, vec!["a"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_creates_get_consecutive_positions(pool: PgPool) {
    let (agency, board) = setup(&pool).await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move { add(&pool, agency, board, &format!("t{i}"), "todo").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    // `column` asserts the positions are exactly 0..len.
    assert_eq!(column(&pool, agency, board, "todo").await.len(), 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_deletes_and_moves_keep_columns_dense(pool: PgPool) {
    let (agency, board) = setup(&pool).await;
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(add(&pool, agency, board, &format!("t{i}"), "todo").await);
    }

    let handles: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let pool = pool.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    assert!(TaskRepo::delete(&pool, agency, id).await.unwrap());
                } else {
                    TaskRepo::move_to(&pool, agency, id, &to("done", 0))
                        .await
                        .unwrap()
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(column(&pool, agency, board, "todo").await.is_empty());
    assert_eq!(column(&pool, agency, board, "done").await.len(), 3);
}
