use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::user::VerificationCreateRequest, models::user::EmailVerification};

pub async fn insert_verification<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: VerificationCreateRequest,
) -> Res<EmailVerification> {
    sqlx::query_as::<_, EmailVerification>(
        r#"
        INSERT INTO email_verifications (user_id, token, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.token)
    .bind(data.expires_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Fetches a token row that is unexpired and not yet consumed.
pub async fn get_valid_verification<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    token: &str,
) -> Res<Option<EmailVerification>> {
    sqlx::query_as::<_, EmailVerification>(
        r#"
        SELECT * FROM email_verifications
        WHERE token = $1 AND consumed_at IS NULL AND expires_at > now()
        "#,
    )
    .bind(token)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn consume_verification<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE email_verifications SET consumed_at = now() WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Invalidates any outstanding tokens before a new one is issued.
pub async fn void_verifications_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query(
        "UPDATE email_verifications SET consumed_at = now() WHERE user_id = $1 AND consumed_at IS NULL",
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(())
}
