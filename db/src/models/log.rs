use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::{JsonValue, ipnetwork::IpNetwork};
use uuid::Uuid;

/// Request bodies are never persisted here. They carry users' private
/// conversation excerpts.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Log {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status_code: i32,
    pub user_id: Option<Uuid>,
    pub params: Option<JsonValue>,
    pub ip_address: IpNetwork,
    pub user_agent: String,
}
