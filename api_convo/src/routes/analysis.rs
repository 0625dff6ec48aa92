use std::sync::Arc;

use actix_web::{Responder, post, web};
use analyst::client::AnalystClient;
use common::error::Res;
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::convo::AnalysisCreateBody;
use crate::services;

/// Submits one input for analysis under a persona. Costs one credit.
///
/// # Output
/// - Success: 201 with the persisted analysis
/// - Error: 403 for unverified accounts, 404 for foreign/missing inputs,
///   429 when the month's credits are exhausted
#[post("/{id}/analyses")]
pub async fn post_analysis(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    body: web::Json<AnalysisCreateBody>,
    pool: web::Data<Arc<PgPool>>,
    analyst: web::Data<AnalystClient>,
) -> Res<impl Responder> {
    let analysis = services::analysis::submit_analysis(
        &pool,
        &analyst,
        &claims,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Success::created(analysis)
}
