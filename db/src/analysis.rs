use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::analysis::AnalysisCreateRequest, models::analysis::Analysis};

pub async fn insert_analysis<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: AnalysisCreateRequest,
) -> Res<Analysis> {
    sqlx::query_as::<_, Analysis>(
        r#"
        INSERT INTO analyses
            (conversation_id, input_id, persona, cringe_score, interest_level,
             flags, suggested_replies, clarifying_questions, summary)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(data.conversation_id)
    .bind(data.input_id)
    .bind(data.persona)
    .bind(data.cringe_score)
    .bind(data.interest_level)
    .bind(data.flags)
    .bind(data.suggested_replies)
    .bind(data.clarifying_questions)
    .bind(data.summary)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_analyses_by_conversation<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    conversation_id: Uuid,
) -> Res<Vec<Analysis>> {
    sqlx::query_as::<_, Analysis>(
        "SELECT * FROM analyses WHERE conversation_id = $1 ORDER BY created_at",
    )
    .bind(conversation_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_analyses<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM analyses")
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
