use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One row per user per calendar month. The `month` column is a "YYYY-MM"
/// key, so a fresh month starts at zero without any reset job.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MonthlyCredit {
    pub user_id: Uuid,
    pub month: String,
    pub used: i32,
    pub updated_at: DateTime<Utc>,
}
