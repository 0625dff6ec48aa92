use chrono::{Duration, Utc};
use common::{
    env_config::Config,
    error::{AppError, Res},
    misc, plans,
};
use db::{
    dtos::user::{UserCreateRequest, VerificationCreateRequest},
    models::user::{AuthCredentials, User},
};
use mailer::Mailer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::auth::{CreditSummary, MeResponse, RegisterRequest},
    services,
};

const VERIFICATION_TTL_HOURS: i64 = 24;

/// Creates a user, stores their hashed credentials and issues a
/// verification token, all in one transaction. The verification mail is
/// sent after commit; a mail failure does not roll back registration.
pub async fn create_user_with_credentials(
    pool: &PgPool,
    req: &RegisterRequest,
    config: &Config,
    mail: &Mailer,
) -> Res<User> {
    let mut tx = pool.begin().await?;

    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            email: req.email.trim().to_lowercase(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
        },
    )
    .await?;

    db::user::insert_user_credentials(
        &mut *tx,
        AuthCredentials {
            user_id: user.id,
            password_hash: services::auth::hash_password(&req.password)?,
        },
    )
    .await?;

    let token = misc::generate_token();
    db::verification::insert_verification(
        &mut *tx,
        VerificationCreateRequest {
            user_id: user.id,
            token: token.clone(),
            expires_at: Utc::now() + Duration::hours(VERIFICATION_TTL_HOURS),
        },
    )
    .await?;

    tx.commit().await?;

    send_verification_mail(mail, config, &user, &token).await;

    Ok(user)
}

/// Consumes a verification token and marks the account verified.
pub async fn verify_email(pool: &PgPool, token: &str) -> Res<User> {
    let verification = db::verification::get_valid_verification(pool, token)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Verification link is invalid or has expired".to_string())
        })?;

    let mut tx = pool.begin().await?;
    db::verification::consume_verification(&mut *tx, verification.id).await?;
    let user = db::user::mark_verified(&mut *tx, verification.user_id).await?;
    tx.commit().await?;

    Ok(user)
}

/// Voids outstanding tokens and mails a fresh one. Responds identically for
/// already-verified accounts so the endpoint leaks nothing.
pub async fn resend_verification(
    pool: &PgPool,
    config: &Config,
    mail: &Mailer,
    email: &str,
) -> Res<()> {
    let user = match db::user::get_user_by_email(pool, &email.trim().to_lowercase()).await {
        Ok(user) => user,
        Err(_) => return Ok(()),
    };

    if user.verified_at.is_some() {
        return Ok(());
    }

    let token = misc::generate_token();
    let mut tx = pool.begin().await?;
    db::verification::void_verifications_for_user(&mut *tx, user.id).await?;
    db::verification::insert_verification(
        &mut *tx,
        VerificationCreateRequest {
            user_id: user.id,
            token: token.clone(),
            expires_at: Utc::now() + Duration::hours(VERIFICATION_TTL_HOURS),
        },
    )
    .await?;
    tx.commit().await?;

    send_verification_mail(mail, config, &user, &token).await;

    Ok(())
}

/// Profile plus the current month's credit position.
pub async fn profile(pool: &PgPool, user_id: Uuid) -> Res<MeResponse> {
    let user = db::user::get_user_by_id(pool, user_id).await?;

    let now = Utc::now();
    let plan = plans::effective_plan(&user.plan, user.plan_expires_at, now);
    let used = db::credit::get_usage(pool, user.id, &plans::month_key(now)).await?;
    let ceiling = plan.monthly_credits();

    Ok(MeResponse {
        plan: plan.as_str().to_string(),
        credits: CreditSummary {
            used,
            ceiling,
            remaining: (ceiling - used).max(0),
        },
        user,
    })
}

/// Deletes the account and everything hanging off it (cascading FKs).
pub async fn delete_account(pool: &PgPool, user_id: Uuid) -> Res<()> {
    db::user::delete_user(pool, user_id).await
}

async fn send_verification_mail(mail: &Mailer, config: &Config, user: &User, token: &str) {
    let link = format!("{}/verify-email?token={}", config.app_base_url, token);
    if let Err(e) = mail.send_verification(&user.email, &user.first_name, &link).await {
        log::warn!("Failed to send verification mail to {}: {}", user.email, e);
    }
}
