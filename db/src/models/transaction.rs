use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Paystack checkout reference.
    pub reference: String,
    /// Amount in kobo.
    pub amount: i64,
    pub currency: String,
    pub plan: String,
    /// "pending", "success" or "failed".
    pub status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
