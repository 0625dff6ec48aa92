use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::env_config::Config;
use common::error::Res;
use common::http::Success;
use common::jwt::JwtClaims;
use common::paystack::PaystackClient;
use common::plans;
use mailer::Mailer;
use sqlx::PgPool;

use crate::dtos::billing::PlansResponse;
use crate::services;

/// Plan catalog plus the public key the frontend passes to Paystack.
#[get("/plans")]
pub async fn get_plans(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    Success::ok(PlansResponse {
        plans: plans::catalog(),
        public_key: config.paystack_public_key.clone(),
    })
}

/// Credit usage for the current calendar month.
#[get("/usage")]
pub async fn get_usage(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let usage = services::billing::usage(&pool, claims.user_id).await?;
    Success::ok(usage)
}

/// Starts a Pro checkout and returns the hosted payment URL.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/dashboard/billing/checkout', {
///   method: 'POST',
///   headers: { 'Authorization': `Bearer ${token}` }
/// });
/// const { authorization_url } = await response.json();
/// window.location.href = authorization_url;
/// ```
#[post("/checkout")]
pub async fn post_checkout(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    paystack: web::Data<PaystackClient>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let checkout =
        services::billing::checkout(&pool, &paystack, &config, claims.user_id).await?;
    Success::created(checkout)
}

/// Confirms a checkout reference after the user returns from Paystack.
/// Idempotent: re-verifying a successful reference changes nothing.
#[get("/verify/{reference}")]
pub async fn get_verify(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
    paystack: web::Data<PaystackClient>,
    mail: web::Data<Arc<Mailer>>,
) -> Res<impl Responder> {
    let outcome =
        services::billing::verify(&pool, &paystack, &mail, claims.user_id, &path).await?;
    Success::ok(outcome)
}
