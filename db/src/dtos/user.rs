use chrono::{DateTime, Utc};
use uuid::Uuid;

pub struct UserCreateRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct VerificationCreateRequest {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct PlanUpdateRequest {
    pub user_id: Uuid,
    pub plan: String,
    pub plan_expires_at: Option<DateTime<Utc>>,
    pub paystack_customer_code: Option<String>,
}
