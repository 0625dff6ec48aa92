use chrono::Utc;
use common::{
    error::{AppError, Res},
    plans,
};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::admin::{Stats, UserDetail, UserPage, UserSummary};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub async fn user_page(pool: &PgPool, limit: Option<i64>, offset: Option<i64>) -> Res<UserPage> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);

    let total = db::user::count_users(pool).await?;
    let rows = db::user::list_users(pool, limit, offset).await?;

    let mut users = Vec::with_capacity(rows.len());
    for user in rows {
        users.push(summarize(pool, user).await?);
    }

    Ok(UserPage {
        users,
        total,
        limit,
        offset,
    })
}

pub async fn user_detail(pool: &PgPool, user_id: Uuid) -> Res<UserDetail> {
    let user = db::user::get_user_by_id(pool, user_id)
        .await
        .map_err(|_| AppError::NotFound("User not found".to_string()))?;

    let conversation_count = db::convo::count_conversations_by_user(pool, user.id).await?;
    let transactions = db::transaction::list_by_user(pool, user.id).await?;
    let summary = summarize(pool, user).await?;

    Ok(UserDetail {
        summary,
        conversation_count,
        transactions,
    })
}

pub async fn stats(pool: &PgPool) -> Res<Stats> {
    Ok(Stats {
        users: db::user::count_users(pool).await?,
        conversations: db::convo::count_conversations(pool).await?,
        analyses: db::analysis::count_analyses(pool).await?,
        revenue_kobo: db::transaction::sum_revenue(pool).await?,
    })
}

/// Hands `credits` back to a user by decrementing their used counter for
/// the current month. The counter floors at zero.
pub async fn grant_credits(pool: &PgPool, user_id: Uuid, credits: i32) -> Res<i32> {
    if credits <= 0 {
        return Err(AppError::BadRequest(
            "Credit grant must be positive".to_string(),
        ));
    }
    // Ensure the user exists before touching the counter.
    db::user::get_user_by_id(pool, user_id)
        .await
        .map_err(|_| AppError::NotFound("User not found".to_string()))?;

    let month = plans::month_key(Utc::now());
    let counter = db::credit::adjust_usage(pool, user_id, &month, -credits).await?;
    Ok(counter.used)
}

async fn summarize(pool: &PgPool, user: User) -> Res<UserSummary> {
    let now = Utc::now();
    let plan = plans::effective_plan(&user.plan, user.plan_expires_at, now);
    let credits_used = db::credit::get_usage(pool, user.id, &plans::month_key(now)).await?;

    Ok(UserSummary {
        user,
        effective_plan: plan.as_str().to_string(),
        credits_used,
    })
}
