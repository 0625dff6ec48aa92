use chrono::{DateTime, Duration, Utc};
use common::{
    env_config::Config,
    error::{AppError, Res},
    misc,
    paystack::{InitializeRequest, PaystackClient},
    plans::{self, PRO_PERIOD_DAYS, PRO_PRICE_KOBO, Plan},
};
use db::dtos::{transaction::TransactionCreateRequest, user::PlanUpdateRequest};
use mailer::Mailer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::billing::{CheckoutResponse, UsageResponse, VerifyResponse};

pub async fn usage(pool: &PgPool, user_id: Uuid) -> Res<UsageResponse> {
    let user = db::user::get_user_by_id(pool, user_id).await?;

    let now = Utc::now();
    let plan = plans::effective_plan(&user.plan, user.plan_expires_at, now);
    let month = plans::month_key(now);
    let used = db::credit::get_usage(pool, user.id, &month).await?;
    let ceiling = plan.monthly_credits();

    Ok(UsageResponse {
        month,
        plan: plan.as_str().to_string(),
        used,
        ceiling,
        remaining: (ceiling - used).max(0),
    })
}

/// Initializes a Pro checkout with Paystack and records the pending
/// transaction under a fresh reference.
pub async fn checkout(
    pool: &PgPool,
    paystack: &PaystackClient,
    config: &Config,
    user_id: Uuid,
) -> Res<CheckoutResponse> {
    let user = db::user::get_user_by_id(pool, user_id).await?;

    let reference = misc::generate_reference();
    let init = paystack
        .initialize_transaction(&InitializeRequest {
            email: user.email.clone(),
            amount: PRO_PRICE_KOBO,
            currency: "NGN".to_string(),
            reference: reference.clone(),
            callback_url: format!("{}/billing/callback", config.app_base_url),
        })
        .await?;

    db::transaction::insert_transaction(
        pool,
        TransactionCreateRequest {
            user_id: user.id,
            reference: reference.clone(),
            amount: PRO_PRICE_KOBO,
            currency: "NGN".to_string(),
            plan: Plan::Pro.as_str().to_string(),
        },
    )
    .await?;

    Ok(CheckoutResponse {
        authorization_url: init.authorization_url,
        reference,
    })
}

/// Confirms a checkout reference with Paystack and applies the upgrade.
/// Safe to call repeatedly: an already-successful reference short-circuits
/// without touching Paystack again.
pub async fn verify(
    pool: &PgPool,
    paystack: &PaystackClient,
    mail: &Mailer,
    user_id: Uuid,
    reference: &str,
) -> Res<VerifyResponse> {
    let transaction = db::transaction::get_by_reference(pool, reference)
        .await?
        .filter(|t| t.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

    if transaction.status == "success" {
        return Ok(VerifyResponse {
            status: transaction.status,
            plan: transaction.plan,
        });
    }

    let data = paystack.verify_transaction(reference).await?;
    if data.status == "success" {
        apply_successful_charge(
            pool,
            mail,
            reference,
            parse_paid_at(data.paid_at.as_deref()),
            data.customer.map(|c| c.customer_code),
        )
        .await?;
        Ok(VerifyResponse {
            status: "success".to_string(),
            plan: transaction.plan,
        })
    } else if data.status == "failed" || data.status == "abandoned" {
        db::transaction::mark_status(pool, reference, "failed", None).await?;
        Ok(VerifyResponse {
            status: "failed".to_string(),
            plan: transaction.plan,
        })
    } else {
        Ok(VerifyResponse {
            status: "pending".to_string(),
            plan: transaction.plan,
        })
    }
}

/// Marks the transaction successful and grants a Pro period, in one
/// transaction. Re-applying for an already-successful reference is a no-op,
/// which makes webhook delivery retries harmless.
pub async fn apply_successful_charge(
    pool: &PgPool,
    mail: &Mailer,
    reference: &str,
    paid_at: Option<DateTime<Utc>>,
    customer_code: Option<String>,
) -> Res<()> {
    let Some(transaction) = db::transaction::get_by_reference(pool, reference).await? else {
        return Err(AppError::NotFound(format!(
            "No transaction for reference {}",
            reference
        )));
    };
    if transaction.status == "success" {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    db::transaction::mark_status(
        &mut *tx,
        reference,
        "success",
        paid_at.or_else(|| Some(Utc::now())),
    )
    .await?;
    let user = db::user::update_plan(
        &mut *tx,
        PlanUpdateRequest {
            user_id: transaction.user_id,
            plan: Plan::Pro.as_str().to_string(),
            plan_expires_at: Some(Utc::now() + Duration::days(PRO_PERIOD_DAYS)),
            paystack_customer_code: customer_code,
        },
    )
    .await?;
    tx.commit().await?;

    if let Err(e) = mail
        .send_receipt(&user.email, &user.first_name, transaction.amount)
        .await
    {
        log::warn!("Failed to send receipt to {}: {}", user.email, e);
    }

    Ok(())
}

fn parse_paid_at(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paystack_paid_at_timestamps() {
        let parsed = parse_paid_at(Some("2025-06-01T12:00:00.000Z")).unwrap();
        assert_eq!(plans::month_key(parsed), "2025-06");
        assert!(parse_paid_at(Some("yesterday")).is_none());
        assert!(parse_paid_at(None).is_none());
    }
}
