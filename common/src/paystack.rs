use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;

use crate::error::{AppError, Res};

const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

/// Thin typed client over the Paystack REST API.
#[derive(Clone)]
pub struct PaystackClient {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
pub struct InitializeRequest {
    pub email: String,
    /// Amount in kobo.
    pub amount: i64,
    pub currency: String,
    pub reference: String,
    pub callback_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyData {
    /// "success", "failed", "abandoned", ...
    pub status: String,
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub paid_at: Option<String>,
    pub customer: Option<PaystackCustomer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystackCustomer {
    pub email: String,
    pub customer_code: String,
}

impl PaystackClient {
    pub fn new(secret_key: &str) -> Self {
        Self::with_base_url(secret_key, PAYSTACK_BASE_URL)
    }

    /// Points the client at a different host. Used by tests and sandboxes.
    pub fn with_base_url(secret_key: &str, base_url: &str) -> Self {
        PaystackClient {
            http: reqwest::Client::new(),
            secret_key: secret_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a hosted checkout for the given amount and returns the
    /// authorization URL the user is redirected to.
    pub async fn initialize_transaction(&self, req: &InitializeRequest) -> Res<InitializeData> {
        let response = self
            .http
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(req)
            .send()
            .await?;

        Self::unwrap_response(response).await
    }

    /// Asks Paystack for the final state of a checkout reference.
    pub async fn verify_transaction(&self, reference: &str) -> Res<VerifyData> {
        let response = self
            .http
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        Self::unwrap_response(response).await
    }

    async fn unwrap_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Res<T> {
        let http_status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            AppError::Internal(format!("Failed to parse Paystack response: {}", e))
        })?;

        if !http_status.is_success() || !body.status {
            return Err(AppError::Internal(format!(
                "Paystack API error ({}): {}",
                http_status, body.message
            )));
        }

        body.data
            .ok_or_else(|| AppError::Internal("Paystack response carried no data".to_string()))
    }
}

/// Checks the `x-paystack-signature` header: HMAC-SHA512 of the raw request
/// body keyed with the account secret, hex encoded.
pub fn verify_webhook_signature(secret_key: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };

    let mut mac = Hmac::<Sha512>::new_from_slice(secret_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Paystack webhook event envelope. Only `charge.success` is acted on.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    pub data: WebhookCharge,
}

#[derive(Debug, Deserialize)]
pub struct WebhookCharge {
    pub reference: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub paid_at: Option<String>,
    pub customer: Option<PaystackCustomer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_matching_webhook_signature() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign("sk_test_abc", body);
        assert!(verify_webhook_signature("sk_test_abc", body, &signature));
    }

    #[test]
    fn rejects_tampered_body_and_bad_hex() {
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign("sk_test_abc", body);
        assert!(!verify_webhook_signature(
            "sk_test_abc",
            br#"{"event":"charge.failed"}"#,
            &signature
        ));
        assert!(!verify_webhook_signature("sk_test_abc", body, "not-hex"));
        assert!(!verify_webhook_signature("sk_other", body, &signature));
    }

    #[test]
    fn decodes_initialize_and_verify_payloads() {
        let init: ApiResponse<InitializeData> = serde_json::from_str(
            r#"{
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.paystack.com/abc123",
                    "access_code": "abc123",
                    "reference": "txp_deadbeef"
                }
            }"#,
        )
        .unwrap();
        assert!(init.status);
        assert_eq!(init.data.unwrap().reference, "txp_deadbeef");

        let verify: ApiResponse<VerifyData> = serde_json::from_str(
            r#"{
                "status": true,
                "message": "Verification successful",
                "data": {
                    "status": "success",
                    "reference": "txp_deadbeef",
                    "amount": 2500000,
                    "currency": "NGN",
                    "paid_at": "2025-06-01T12:00:00.000Z",
                    "customer": {
                        "email": "sam@example.com",
                        "customer_code": "CUS_xyz"
                    }
                }
            }"#,
        )
        .unwrap();
        let data = verify.data.unwrap();
        assert_eq!(data.status, "success");
        assert_eq!(data.amount, 2_500_000);
        assert_eq!(data.customer.unwrap().customer_code, "CUS_xyz");
    }

    #[test]
    fn decodes_webhook_event() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "event": "charge.success",
                "data": {
                    "reference": "txp_deadbeef",
                    "status": "success",
                    "amount": 2500000,
                    "currency": "NGN",
                    "paid_at": null,
                    "customer": null
                }
            }"#,
        )
        .unwrap();
        assert_eq!(event.event, "charge.success");
        assert_eq!(event.data.reference, "txp_deadbeef");
    }
}
