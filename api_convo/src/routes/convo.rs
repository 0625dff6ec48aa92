use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::error::Res;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::convo::{ConversationCreateBody, InputCreateBody};
use crate::services;

/// Lists the caller's conversations, most recently active first.
#[get("")]
pub async fn get_conversations(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let conversations = db::convo::list_conversations_by_user(pg_pool, claims.user_id).await?;
    Success::ok(conversations)
}

/// Creates a conversation with a title and a default persona.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/dashboard/conversations', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${token}`
///   },
///   body: JSON.stringify({ title: 'The situationship', persona: 'straight_shooter' })
/// });
/// ```
#[post("")]
pub async fn post_conversation(
    claims: web::ReqData<JwtClaims>,
    body: web::Json<ConversationCreateBody>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let conversation =
        services::convo::create_conversation(&pool, claims.user_id, body.into_inner()).await?;
    Success::created(conversation)
}

/// Fetches one conversation with its inputs and analyses. 404 for ids the
/// caller does not own.
#[get("/{id}")]
pub async fn get_conversation(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let detail =
        services::convo::conversation_detail(&pool, path.into_inner(), claims.user_id).await?;
    Success::ok(detail)
}

#[delete("/{id}")]
pub async fn delete_conversation(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    services::convo::remove_conversation(&pool, path.into_inner(), claims.user_id).await?;
    Success::ok(serde_json::json!({ "status": "deleted" }))
}

/// Appends a text excerpt or a base64 screenshot to a conversation.
#[post("/{id}/inputs")]
pub async fn post_input(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    body: web::Json<InputCreateBody>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let input =
        services::convo::append_input(&pool, path.into_inner(), claims.user_id, body.into_inner())
            .await?;
    Success::created(input)
}
