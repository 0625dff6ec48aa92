use analyst::{
    clarify::derive_clarifying_questions,
    client::AnalystClient,
    persona::Persona,
    types::{AnalysisInput, InputKind},
};
use chrono::Utc;
use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    plans,
};
use db::{dtos::analysis::AnalysisCreateRequest, models::analysis::Analysis};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::convo::AnalysisCreateBody, services};

/// Runs one input through the analyst and persists the verdict.
///
/// The credit counter is bumped in the same transaction that stores the
/// analysis, and the post-increment value is re-checked so concurrent
/// submissions cannot slip past the ceiling.
pub async fn submit_analysis(
    pool: &PgPool,
    analyst: &AnalystClient,
    claims: &JwtClaims,
    conversation_id: Uuid,
    body: AnalysisCreateBody,
) -> Res<Analysis> {
    let conversation = services::convo::require_owned(pool, conversation_id, claims.user_id).await?;

    let user = db::user::get_user_by_id(pool, claims.user_id).await?;
    if user.verified_at.is_none() {
        return Err(AppError::Forbidden(
            "Verify your email address before submitting analyses".to_string(),
        ));
    }

    let input_row = db::convo::get_input(pool, body.input_id, conversation.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Input not found in this conversation".to_string()))?;

    let persona_raw = body.persona.as_deref().unwrap_or(&conversation.persona);
    let persona = Persona::parse(persona_raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown persona '{}'", persona_raw)))?;

    let now = Utc::now();
    let plan = plans::effective_plan(&user.plan, user.plan_expires_at, now);
    let month = plans::month_key(now);
    let ceiling = plan.monthly_credits();

    let used = db::credit::get_usage(pool, user.id, &month).await?;
    if used >= ceiling {
        return Err(AppError::TooManyRequests(format!(
            "Monthly analysis limit reached ({}/{}). Upgrade to Pro or wait for the next month.",
            used, ceiling
        )));
    }

    let kind = InputKind::parse(&input_row.kind)
        .ok_or_else(|| AppError::Internal(format!("Stored input kind '{}' is invalid", input_row.kind)))?;
    let analysis_input = AnalysisInput {
        kind,
        content: &input_row.content,
    };

    let verdict = analyst.analyze(&analysis_input, persona).await?;
    let clarifying_questions = derive_clarifying_questions(&analysis_input);

    let flags = serde_json::to_value(&verdict.flags)
        .map_err(|e| AppError::Internal(format!("Failed to serialize flags: {}", e)))?;
    let suggested_replies = serde_json::to_value(&verdict.suggested_replies)
        .map_err(|e| AppError::Internal(format!("Failed to serialize replies: {}", e)))?;
    let clarifying_questions = serde_json::to_value(&clarifying_questions)
        .map_err(|e| AppError::Internal(format!("Failed to serialize questions: {}", e)))?;

    let mut tx = pool.begin().await?;
    let counter = db::credit::adjust_usage(&mut *tx, user.id, &month, 1).await?;
    if counter.used > ceiling {
        tx.rollback().await?;
        return Err(AppError::TooManyRequests(format!(
            "Monthly analysis limit reached ({}/{})",
            ceiling, ceiling
        )));
    }
    let analysis = db::analysis::insert_analysis(
        &mut *tx,
        AnalysisCreateRequest {
            conversation_id: conversation.id,
            input_id: input_row.id,
            persona: persona.as_str().to_string(),
            cringe_score: i32::from(verdict.cringe_score),
            interest_level: i32::from(verdict.interest_level),
            flags,
            suggested_replies,
            clarifying_questions,
            summary: verdict.summary,
        },
    )
    .await?;
    db::convo::touch_conversation(&mut *tx, conversation.id).await?;
    tx.commit().await?;

    Ok(analysis)
}
