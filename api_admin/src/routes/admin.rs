use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::error::Res;
use common::http::Success;
use db::dtos::log::ReportFilter;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::admin::{CreditGrantBody, LogQuery, PageQuery, RecentConversations};
use crate::services;

const RECENT_CONVERSATIONS_LIMIT: i64 = 100;

/// Paged user list with effective plan and this month's usage.
#[get("/users")]
pub async fn get_users(
    query: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let page = services::admin::user_page(&pool, query.limit, query.offset).await?;
    Success::ok(page)
}

#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let detail = services::admin::user_detail(&pool, path.into_inner()).await?;
    Success::ok(detail)
}

/// Most recently created conversations across all users. Titles and
/// personas only; inputs stay private to their owners.
#[get("/conversations")]
pub async fn get_conversations(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let conversations =
        db::convo::recent_conversations(pg_pool, RECENT_CONVERSATIONS_LIMIT).await?;
    Success::ok(RecentConversations { conversations })
}

#[get("/stats")]
pub async fn get_stats(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let stats = services::admin::stats(&pool).await?;
    Success::ok(stats)
}

/// Request-log report with optional filters, newest first.
#[get("/logs")]
pub async fn get_logs(
    query: web::Query<LogQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let query = query.into_inner();
    let logs = db::log::get_report(
        pg_pool,
        ReportFilter {
            user_id: query.user_id,
            method: query.method,
            code: query.code,
            path: query.path,
            ending_before: query.ending_before,
            starting_after: query.starting_after,
            limit: query.limit,
        },
    )
    .await?;
    Success::ok(logs)
}

/// Hands bonus credits to a user for the current month.
#[post("/credits/grant")]
pub async fn post_credits_grant(
    body: web::Json<CreditGrantBody>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let used = services::admin::grant_credits(&pool, body.user_id, body.credits).await?;
    Success::ok(serde_json::json!({ "user_id": body.user_id, "credits_used": used }))
}
