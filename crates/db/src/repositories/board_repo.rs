//! Repository for the `boards` table.

use agencia_core::types::DbId;
use sqlx::PgPool;

use crate::models::board::{Board, CreateBoard, UpdateBoard};

const COLUMNS: &str = "id, agency_id, project_id, name, created_at, updated_at";

pub struct BoardRepo;

impl BoardRepo {
    pub async fn create(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateBoard,
    ) -> Result<Board, sqlx::Error> {
        let query = format!(
            "INSERT INTO boards (agency_id, project_id, name) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(agency_id)
            .bind(input.project_id)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1 AND agency_id = $2");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(agency_id)
            .fetch_optional(pool)
            .await
    }

    /// All boards of an agency, oldest first.
    pub async fn list(pool: &PgPool, agency_id: DbId) -> Result<Vec<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE agency_id = $1 ORDER BY id");
        sqlx::query_as::<_, Board>(&query)
            .bind(agency_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        agency_id: DbId,
        id: DbId,
        input: &UpdateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!(
            "UPDATE boards SET \
                name = COALESCE($3, name), \
                project_id = COALESCE($4, project_id) \
             WHERE id = $1 AND agency_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(agency_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a board and, by cascade, its tasks.
    pub async fn delete(pool: &PgPool, agency_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1 AND agency_id = $2")
            .bind(id)
            .bind(agency_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
