//! HTTP-level tests for the client, project, revenue and expense resources.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_client, delete, get, post_json, put_json, register};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_crud(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Crud Co", "owner@crud.test").await;

    let created = post_json(
        &app,
        "/api/clients",
        &token,
        json!({
            "name": "Padaria Pão Quente",
            "email": "contato@padaria.test",
            "company": "Pão Quente Ltda",
            "monthly_fee_cents": 250_000,
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let client = body_json(created).await;
    assert_eq!(client["status"], "active");
    let id = client["id"].as_i64().unwrap();

    let fetched = body_json(get(&app, &format!("/api/clients/{id}"), &token).await).await;
    assert_eq!(fetched["name"], "Padaria Pão Quente");

    // Partial update leaves untouched fields as they were.
    let updated = put_json(
        &app,
        &format!("/api/clients/{id}"),
        &token,
        json!({ "status": "inactive" }),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["monthly_fee_cents"], 250_000);
    assert_eq!(updated["company"], "Pão Quente Ltda");

    assert_eq!(
        delete(&app, &format!("/api/clients/{id}"), &token).await.status(),
        StatusCode::NO_CONTENT
    );
    let gone = get(&app, &format!("/api/clients/{id}"), &token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(gone).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_validation_errors(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Valid Co", "owner@valid.test").await;

    let response = post_json(
        &app,
        "/api/clients",
        &token,
        json!({ "name": "", "status": "vip", "monthly_fee_cents": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["monthly_fee_cents", "name", "status"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_search_and_status_filter(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Filter Co", "owner@filter.test").await;
    create_client(&app, &token, "Academia Forte").await;
    create_client(&app, &token, "Pet Shop Amigo").await;
    let inactive = create_client(&app, &token, "Academia Leve").await;
    put_json(
        &app,
        &format!("/api/clients/{inactive}"),
        &token,
        json!({ "status": "inactive" }),
    )
    .await;

    let json = body_json(get(&app, "/api/clients?search=academia", &token).await).await;
    assert_eq!(json["pagination"]["total"], 2);

    let json = body_json(get(&app, "/api/clients?search=academia&status=active", &token).await).await;
    assert_eq!(json["data"][0]["name"], "Academia Forte");
    assert_eq!(json["pagination"]["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination_boundaries(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Page Co", "owner@page.test").await;

    let empty = body_json(get(&app, "/api/clients", &token).await).await;
    assert_eq!(empty["data"].as_array().unwrap().len(), 0);
    assert_eq!(
        empty["pagination"],
        json!({ "page": 1, "limit": 10, "total": 0, "totalPages": 0 })
    );

    for i in 0..3 {
        create_client(&app, &token, &format!("Cliente {i}")).await;
    }

    let json = body_json(get(&app, "/api/clients?limit=0&page=-3", &token).await).await;
    assert_eq!(json["pagination"]["limit"], 1);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["totalPages"], 3);
    assert_eq!(json["data"][0]["name"], "Cliente 0");

    let json = body_json(get(&app, "/api/clients?limit=500", &token).await).await;
    assert_eq!(json["pagination"]["limit"], 100);

    let json = body_json(get(&app, "/api/clients?limit=2&page=2", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["pagination"]["totalPages"], 2);

    let past_end = body_json(get(&app, "/api/clients?limit=2&page=9", &token).await).await;
    assert!(past_end["data"].as_array().unwrap().is_empty());
    assert_eq!(past_end["pagination"]["total"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tenants_cannot_see_each_other(pool: PgPool) {
    let app = build_test_app(pool);
    let alpha = register(&app, "Alpha", "owner@alpha.test").await;
    let beta = register(&app, "Beta", "owner@beta.test").await;

    let client_id = create_client(&app, &alpha, "Segredo da Alpha").await;
    let uri = format!("/api/clients/{client_id}");

    assert_eq!(get(&app, &uri, &beta).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        put_json(&app, &uri, &beta, json!({ "name": "Hijacked" })).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(delete(&app, &uri, &beta).await.status(), StatusCode::NOT_FOUND);

    let listed = body_json(get(&app, "/api/clients", &beta).await).await;
    assert_eq!(listed["pagination"]["total"], 0);

    // Referencing another agency's client is indistinguishable from a missing one.
    let project = post_json(
        &app,
        "/api/projects",
        &beta,
        json!({ "client_id": client_id, "name": "Sneaky" }),
    )
    .await;
    assert_eq!(project.status(), StatusCode::NOT_FOUND);

    let revenue = post_json(
        &app,
        "/api/revenues",
        &beta,
        json!({
            "client_id": client_id,
            "description": "Sneaky",
            "amount_cents": 100,
            "received_on": "2026-10-01",
        }),
    )
    .await;
    assert_eq!(revenue.status(), StatusCode::NOT_FOUND);

    // The owner still sees the untouched row.
    let json = body_json(get(&app, &uri, &alpha).await).await;
    assert_eq!(json["name"], "Segredo da Alpha");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projects_belong_to_clients(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Proj Co", "owner@proj.test").await;
    let client_id = create_client(&app, &token, "Loja Azul").await;

    let created = post_json(
        &app,
        "/api/projects",
        &token,
        json!({
            "client_id": client_id,
            "name": "Site novo",
            "budget_cents": 1_200_000,
            "start_date": "2026-10-01",
            "end_date": "2026-12-15",
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let project = body_json(created).await;
    assert_eq!(project["status"], "planning");
    assert_eq!(project["client_name"], "Loja Azul");

    let filtered = body_json(
        get(&app, &format!("/api/projects?client_id={client_id}"), &token).await,
    )
    .await;
    assert_eq!(filtered["pagination"]["total"], 1);

    // A client with projects cannot be deleted.
    let blocked = delete(&app, &format!("/api/clients/{client_id}"), &token).await;
    assert_eq!(blocked.status(), StatusCode::CONFLICT);

    let reversed = post_json(
        &app,
        "/api/projects",
        &token,
        json!({
            "client_id": client_id,
            "name": "Datas trocadas",
            "start_date": "2026-12-01",
            "end_date": "2026-11-01",
        }),
    )
    .await;
    assert_eq!(reversed.status(), StatusCode::BAD_REQUEST);

    let missing_client = post_json(
        &app,
        "/api/projects",
        &token,
        json!({ "client_id": 999_999, "name": "Órfão" }),
    )
    .await;
    assert_eq!(missing_client.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revenue_filters_and_defaults(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Fin Co", "owner@fin.test").await;

    for (description, date, status) in [
        ("Setembro", "2026-09-20", "received"),
        ("Outubro", "2026-10-05", "received"),
        ("Outubro pendente", "2026-10-20", "pending"),
    ] {
        let response = post_json(
            &app,
            "/api/revenues",
            &token,
            json!({
                "description": description,
                "amount_cents": 10_000,
                "status": status,
                "received_on": date,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let october = body_json(
        get(&app, "/api/revenues?from=2026-10-01&to=2026-10-31", &token).await,
    )
    .await;
    assert_eq!(october["pagination"]["total"], 2);
    // Newest first.
    assert_eq!(october["data"][0]["description"], "Outubro pendente");

    let pending = body_json(get(&app, "/api/revenues?status=pending", &token).await).await;
    assert_eq!(pending["pagination"]["total"], 1);

    let invalid = post_json(
        &app,
        "/api/revenues",
        &token,
        json!({ "description": "Zero", "amount_cents": 0, "received_on": "2026-10-01" }),
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expense_crud(pool: PgPool) {
    let app = build_test_app(pool);
    let token = register(&app, "Cost Co", "owner@cost.test").await;

    let created = post_json(
        &app,
        "/api/expenses",
        &token,
        json!({
            "description": "Licença de software",
            "amount_cents": 9_990,
            "category": "software",
            "spent_on": "2026-10-03",
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let updated = body_json(
        put_json(
            &app,
            &format!("/api/expenses/{id}"),
            &token,
            json!({ "amount_cents": 12_000 }),
        )
        .await,
    )
    .await;
    assert_eq!(updated["amount_cents"], 12_000);
    assert_eq!(updated["category"], "software");

    let listed = body_json(get(&app, "/api/expenses?category=software", &token).await).await;
    assert_eq!(listed["pagination"]["total"], 1);

    assert_eq!(
        delete(&app, &format!("/api/expenses/{id}"), &token).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete(&app, &format!("/api/expenses/{id}"), &token).await.status(),
        StatusCode::NOT_FOUND
    );
}
