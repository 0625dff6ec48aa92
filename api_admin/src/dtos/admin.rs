use chrono::{DateTime, Utc};
use db::models::{convo::Conversation, transaction::Transaction, user::User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    /// Effective plan id after expiry normalization.
    pub effective_plan: String,
    pub credits_used: i32,
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub summary: UserSummary,
    pub conversation_count: i64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct Stats {
    pub users: i64,
    pub conversations: i64,
    pub analyses: i64,
    /// Kobo collected across successful transactions.
    pub revenue_kobo: i64,
}

#[derive(Debug, Serialize)]
pub struct RecentConversations {
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Deserialize)]
pub struct CreditGrantBody {
    pub user_id: Uuid,
    /// Credits to hand back. Positive grants reduce the used counter.
    pub credits: i32,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub user_id: Option<Uuid>,
    pub method: Option<String>,
    pub code: Option<i32>,
    pub path: Option<String>,
    pub ending_before: Option<DateTime<Utc>>,
    pub starting_after: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}
