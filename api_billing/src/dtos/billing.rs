use common::plans::PlanInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanInfo>,
    /// Paystack public key the frontend needs for inline checkout.
    pub public_key: String,
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub month: String,
    pub plan: String,
    pub used: i32,
    pub ceiling: i32,
    pub remaining: i32,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub authorization_url: String,
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// "pending", "success" or "failed".
    pub status: String,
    pub plan: String,
}
