//! HTTP-level tests for boards and task moves.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json, register};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_board(app: &axum::Router, token: &str) -> i64 {
    let response = post_json(app, "/api/boards", token, json!({ "name": "Sprint" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_task(app: &axum::Router, token: &str, board_id: i64, title: &str) -> Value {
    let response = post_json(
        app,
        "/api/tasks",
        token,
        json!({ "board_id": board_id, "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Task titles per column, in display order.
async fn column_titles(app: &axum::Router, token: &str, board_id: i64) -> Vec<Vec<String>> {
    let board = body_json(get(app, &format!("/api/boards/{board_id}"), token).await).await;
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|col| {
            col["tasks"]
                .as_array()
                .unwrap()
                .iter()
                .map(|t| t["title"].as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_board_has_four_columns(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Kanban Co", "owner@kanban.test").await;
    let board_id = create_board(&app, &token).await;

    let board = body_json(get(&app, &format!("/api/boards/{board_id}"), &token).await).await;
    assert_eq!(board["name"], "Sprint");
    let statuses: Vec<&str> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["todo", "in_progress", "review", "done"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_tasks_append_to_column(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Append Co", "owner@append.test").await;
    let board_id = create_board(&app, &token).await;

    let first = create_task(&app, &token, board_id, "Briefing").await;
    let second = create_task(&app, &token, board_id, "Roteiro").await;
    assert_eq!(first["position"], 0);
    assert_eq!(second["position"], 1);
    assert_eq!(first["status"], "todo");
    assert_eq!(first["priority"], "medium");

    let missing_board = post_json(
        &app,
        "/api/tasks",
        &token,
        json!({ "board_id": 999_999, "title": "Lost" }),
    )
    .await;
    assert_eq!(missing_board.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_task_between_and_within_columns(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Move Co", "owner@move.test").await;
    let board_id = create_board(&app, &token).await;

    let a = create_task(&app, &token, board_id, "A").await["id"].as_i64().unwrap();
    create_task(&app, &token, board_id, "B").await;
    let c = create_task(&app, &token, board_id, "C").await["id"].as_i64().unwrap();

    // A to the top of "in_progress".
    let moved = patch_json(
        &app,
        &format!("/api/tasks/{a}/move"),
        &token,
        json!({ "status": "in_progress", "position": 0 }),
    )
    .await;
    assert_eq!(moved.status(), StatusCode::OK);
    let moved = body_json(moved).await;
    assert_eq!(moved["status"], "in_progress");
    assert_eq!(moved["position"], 0);

    assert_eq!(
        column_titles(&app, &token, board_id).await,
        vec![vec!["B", "C"], vec!["A"], vec![], vec![]]
    );

    // C to the front of its own column; an oversized position clamps.
    patch_json(
        &app,
        &format!("/api/tasks/{c}/move"),
        &token,
        json!({ "status": "todo", "position": 0 }),
    )
    .await;
    let far = patch_json(
        &app,
        &format!("/api/tasks/{c}/move"),
        &token,
        json!({ "status": "in_progress", "position": 50 }),
    )
    .await;
    assert_eq!(body_json(far).await["position"], 1);

    assert_eq!(
        column_titles(&app, &token, board_id).await,
        vec![vec!["B"], vec!["A", "C"], vec![], vec![]]
    );

    // Deleting A closes the gap it leaves.
    assert_eq!(
        delete(&app, &format!("/api/tasks/{a}"), &token).await.status(),
        StatusCode::NO_CONTENT
    );
    let c_after = body_json(get(&app, &format!("/api/tasks/{c}"), &token).await).await;
    assert_eq!(c_after["position"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_rejects_bad_status_and_foreign_task(pool: PgPool) {
    let app = build_test_app(pool);
    let owner = register(&app, "Mine", "owner@mine.test").await;
    let other = register(&app, "Theirs", "owner@theirs.test").await;
    let board_id = create_board(&app, &owner).await;
    let task = create_task(&app, &owner, board_id, "Privado").await["id"].as_i64().unwrap();

    let bad_status = patch_json(
        &app,
        &format!("/api/tasks/{task}/move"),
        &owner,
        json!({ "status": "blocked", "position": 0 }),
    )
    .await;
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);

    let foreign = patch_json(
        &app,
        &format!("/api/tasks/{task}/move"),
        &other,
        json!({ "status": "done", "position": 0 }),
    )
    .await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

    let unchanged = body_json(get(&app, &format!("/api/tasks/{task}"), &owner).await).await;
    assert_eq!(unchanged["status"], "todo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_list_filters(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "List Co", "owner@list.test").await;
    let board_id = create_board(&app, &token).await;
    create_task(&app, &token, board_id, "Post de Natal").await;
    let done = create_task(&app, &token, board_id, "Relatório").await["id"].as_i64().unwrap();
    patch_json(
        &app,
        &format!("/api/tasks/{done}/move"),
        &token,
        json!({ "status": "done", "position": 0 }),
    )
    .await;

    let todo = body_json(get(&app, "/api/tasks?status=todo", &token).await).await;
    assert_eq!(todo["pagination"]["total"], 1);
    assert_eq!(todo["data"][0]["title"], "Post de Natal");

    let search = body_json(get(&app, "/api/tasks?search=relat", &token).await).await;
    assert_eq!(search["data"][0]["id"], done);
}
