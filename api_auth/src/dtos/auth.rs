use db::models::user::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CreditSummary {
    pub used: i32,
    pub ceiling: i32,
    pub remaining: i32,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    /// Effective plan id after expiry normalization.
    pub plan: String,
    pub credits: CreditSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_deserializes() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"ada@example.com","password":"hunter22","first_name":"Ada","last_name":"Obi"}"#,
        )
        .unwrap();
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.first_name, "Ada");
    }

    #[test]
    fn credit_summary_serializes_remaining() {
        let summary = CreditSummary {
            used: 3,
            ceiling: 5,
            remaining: 2,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["remaining"], 2);
    }
}
