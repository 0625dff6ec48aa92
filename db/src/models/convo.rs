use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub persona: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ConversationInput {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub position: i32,
    /// "text" or "image".
    pub kind: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
