//! AI usage ledger model.

use agencia_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ai_usage` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiUsage {
    pub id: DbId,
    pub agency_id: DbId,
    pub user_id: Option<DbId>,
    pub feature: String,
    pub model: String,
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAiUsage {
    pub user_id: Option<DbId>,
    pub feature: String,
    pub model: String,
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
}

/// Per-feature totals for a period.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeatureUsage {
    pub feature: String,
    pub requests: i64,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
}
