use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::paystack::{self, WebhookEvent};
use mailer::Mailer;
use sqlx::PgPool;

use crate::services;

const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Paystack event delivery. The HMAC-SHA512 signature over the raw body is
/// the only authentication; a bad or missing signature is a 401.
///
/// Accepted events always get a 200 so Paystack stops retrying, even when
/// the event is one we ignore or the reference is unknown.
#[post("/webhook")]
pub async fn post_webhook(
    req: HttpRequest,
    body: web::Bytes,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    mail: web::Data<Arc<Mailer>>,
) -> Res<impl Responder> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing webhook signature".to_string()))?;

    if !paystack::verify_webhook_signature(&config.paystack_secret_key, &body, signature) {
        return Err(AppError::Unauthorized(
            "Invalid webhook signature".to_string(),
        ));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {}", e)))?;

    if event.event == "charge.success" {
        let charge = event.data;
        let paid_at = charge
            .paid_at
            .as_deref()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&chrono::Utc));

        match services::billing::apply_successful_charge(
            &pool,
            &mail,
            &charge.reference,
            paid_at,
            charge.customer.map(|c| c.customer_code),
        )
        .await
        {
            Ok(()) => {}
            Err(AppError::NotFound(_)) => {
                log::warn!("Webhook for unknown reference {}", charge.reference);
            }
            Err(e) => return Err(e),
        }
    } else {
        log::debug!("Ignoring webhook event {}", event.event);
    }

    Ok(HttpResponse::Ok().finish())
}
