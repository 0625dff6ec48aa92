use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::transaction::TransactionCreateRequest, models::transaction::Transaction};

pub async fn insert_transaction<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: TransactionCreateRequest,
) -> Res<Transaction> {
    sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (user_id, reference, amount, currency, plan)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.reference)
    .bind(data.amount)
    .bind(data.currency)
    .bind(data.plan)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_by_reference<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reference: &str,
) -> Res<Option<Transaction>> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE reference = $1")
        .bind(reference)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn mark_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    reference: &str,
    status: &str,
    paid_at: Option<DateTime<Utc>>,
) -> Res<Transaction> {
    sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET status = $2, paid_at = COALESCE($3, paid_at)
        WHERE reference = $1
        RETURNING *
        "#,
    )
    .bind(reference)
    .bind(status)
    .bind(paid_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Total kobo collected across successful transactions.
pub async fn sum_revenue<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM transactions WHERE status = 'success'",
    )
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
