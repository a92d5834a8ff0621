//! HTTP-level tests for the dashboard aggregates.

mod common;

use agencia_core::finance::MonthWindow;
use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::{body_json, build_test_app, create_client, get, post_json, register};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_agency_has_zeroed_stats(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Empty Co", "owner@empty.test").await;

    let response = get(&app, "/api/dashboard/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["clients"], json!({ "total": 0, "active": 0 }));
    assert_eq!(stats["revenue"]["change_pct"], 0.0);
    assert_eq!(stats["profit_cents"], 0);
    assert_eq!(stats["ai_requests_month"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_month_over_month_finances(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Money Co", "owner@money.test").await;

    let month = MonthWindow::containing(Utc::now().date_naive());
    let this_month = month.start.to_string();
    let last_month = month.previous().start.to_string();

    for (amount, date, status) in [
        (300_000, this_month.as_str(), "received"),
        (200_000, last_month.as_str(), "received"),
        (50_000, this_month.as_str(), "pending"),
    ] {
        let response = post_json(
            &app,
            "/api/revenues",
            &token,
            json!({
                "description": "Mensalidade",
                "amount_cents": amount,
                "status": status,
                "received_on": date,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    for (amount, date) in [(100_000, this_month.as_str()), (100_000, last_month.as_str())] {
        post_json(
            &app,
            "/api/expenses",
            &token,
            json!({ "description": "Ferramentas", "amount_cents": amount, "spent_on": date }),
        )
        .await;
    }

    let stats = body_json(get(&app, "/api/dashboard/stats", &token).await).await;
    assert_eq!(
        stats["revenue"],
        json!({
            "current_month_cents": 300_000,
            "previous_month_cents": 200_000,
            "change_pct": 50.0,
        })
    );
    assert_eq!(stats["expenses"]["change_pct"], 0.0);
    assert_eq!(stats["profit_cents"], 200_000);
    assert_eq!(stats["pending_revenue_cents"], 50_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_counts_clients_projects_and_overdue_tasks(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Count Co", "owner@count.test").await;

    let client_id = create_client(&app, &token, "Cliente A").await;
    create_client(&app, &token, "Cliente B").await;
    post_json(
        &app,
        "/api/projects",
        &token,
        json!({ "client_id": client_id, "name": "Campanha", "status": "in_progress" }),
    )
    .await;

    let board = body_json(post_json(&app, "/api/boards", &token, json!({ "name": "Geral" })).await).await;
    let yesterday = Utc::now().date_naive() - Days::new(1);
    post_json(
        &app,
        "/api/tasks",
        &token,
        json!({ "board_id": board["id"], "title": "Atrasada", "due_date": yesterday.to_string() }),
    )
    .await;
    post_json(
        &app,
        "/api/tasks",
        &token,
        json!({ "board_id": board["id"], "title": "Feita", "status": "done", "due_date": yesterday.to_string() }),
    )
    .await;

    let stats = body_json(get(&app, "/api/dashboard/stats", &token).await).await;
    assert_eq!(stats["clients"]["total"], 2);
    assert_eq!(stats["projects"]["in_progress"], 1);
    assert_eq!(stats["tasks"], json!({ "open": 1, "done": 1, "overdue": 1 }));
}
