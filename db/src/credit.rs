use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::credit::MonthlyCredit;

pub async fn get_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    month: &str,
) -> Res<i32> {
    let used: Option<i32> = sqlx::query_scalar(
        "SELECT used FROM monthly_credits WHERE user_id = $1 AND month = $2",
    )
    .bind(user_id)
    .bind(month)
    .fetch_optional(executor)
    .await?;
    Ok(used.unwrap_or(0))
}

/// Adds `delta` to the month's counter (creating the row if needed) and
/// returns the updated row. Negative deltas floor at zero; admins use them
/// to hand back credits.
pub async fn adjust_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    month: &str,
    delta: i32,
) -> Res<MonthlyCredit> {
    sqlx::query_as::<_, MonthlyCredit>(
        r#"
        INSERT INTO monthly_credits (user_id, month, used)
        VALUES ($1, $2, GREATEST(0, $3))
        ON CONFLICT (user_id, month)
        DO UPDATE SET used = GREATEST(0, monthly_credits.used + $3), updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(month)
    .bind(delta)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
