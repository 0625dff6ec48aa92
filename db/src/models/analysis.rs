use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::JsonValue;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Analysis {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub input_id: Uuid,
    pub persona: String,
    pub cringe_score: i32,
    pub interest_level: i32,
    pub flags: JsonValue,
    pub suggested_replies: JsonValue,
    pub clarifying_questions: JsonValue,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
