use std::sync::Arc;

use actix_web::{Responder, delete, get, web};
use common::error::Res;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;

use crate::services;

/// Returns the caller's profile, effective plan and credit position for
/// the current month.
#[get("/me")]
pub async fn get_me(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let me = services::user::profile(&pool, claims.user_id).await?;
    Success::ok(me)
}

/// Deletes the caller's account along with their conversations, analyses
/// and billing history.
#[delete("/me")]
pub async fn delete_me(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    services::user::delete_account(&pool, claims.user_id).await?;
    Success::ok(serde_json::json!({ "status": "deleted" }))
}
