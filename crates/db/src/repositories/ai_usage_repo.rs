//! Repository for the `ai_usage` ledger.

use agencia_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::ai_usage::{AiUsage, CreateAiUsage, FeatureUsage};

const COLUMNS: &str =
    "id, agency_id, user_id, feature, model, prompt_tokens, completion_tokens, created_at";

pub struct AiUsageRepo;

impl AiUsageRepo {
    /// Append one usage record.
    pub async fn record(
        pool: &PgPool,
        agency_id: DbId,
        input: &CreateAiUsage,
    ) -> Result<AiUsage, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_usage (agency_id, user_id, feature, model, prompt_tokens, completion_tokens) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiUsage>(&query)
            .bind(agency_id)
            .bind(input.user_id)
            .bind(&input.feature)
            .bind(&input.model)
            .bind(input.prompt_tokens)
            .bind(input.completion_tokens)
            .fetch_one(pool)
            .await
    }

    /// Number of AI requests made since `since`.
    pub async fn count_since(
        pool: &PgPool,
        agency_id: DbId,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ai_usage WHERE agency_id = $1 AND created_at >= $2")
            .bind(agency_id)
            .bind(since)
            .fetch_one(pool)
            .await
    }

    /// Per-feature totals since `since`, busiest feature first.
    pub async fn summary_since(
        pool: &PgPool,
        agency_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<FeatureUsage>, sqlx::Error> {
        sqlx::query_as::<_, FeatureUsage>(
            "SELECT feature, \
                    COUNT(*) AS requests, \
                    COALESCE(SUM(prompt_tokens), 0)::BIGINT AS prompt_tokens, \
                    COALESCE(SUM(completion_tokens), 0)::BIGINT AS completion_tokens \
             FROM ai_usage \
             WHERE agency_id = $1 AND created_at >= $2 \
             GROUP BY feature \
             ORDER BY requests DESC, feature",
        )
        .bind(agency_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
