use chrono::{DateTime, Utc};
use sqlx::types::{JsonValue, ipnetwork::IpNetwork};
use uuid::Uuid;

pub struct LogCreateRequest {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status_code: i32,
    pub user_id: Option<Uuid>,
    pub params: Option<JsonValue>,
    pub ip_address: IpNetwork,
    pub user_agent: String,
}

#[derive(Debug, Default)]
pub struct ReportFilter {
    pub user_id: Option<Uuid>,
    pub method: Option<String>,
    pub code: Option<i32>,
    pub path: Option<String>,
    pub ending_before: Option<DateTime<Utc>>,
    pub starting_after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}
