use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::convo::{ConversationCreateRequest, InputCreateRequest},
    models::convo::{Conversation, ConversationInput},
};

pub async fn insert_conversation<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ConversationCreateRequest,
) -> Res<Conversation> {
    sqlx::query_as::<_, Conversation>(
        r#"
        INSERT INTO conversations (user_id, title, persona)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.title)
    .bind(data.persona)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Fetches a conversation only if it belongs to `user_id`. Ownership is the
/// read boundary: another session's id behaves like a missing row.
pub async fn get_owned_conversation<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Res<Option<Conversation>> {
    sqlx::query_as::<_, Conversation>(
        "SELECT * FROM conversations WHERE id = $1 AND user_id = $2",
    )
    .bind(conversation_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_conversations_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Conversation>> {
    sqlx::query_as::<_, Conversation>(
        "SELECT * FROM conversations WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_conversation<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM conversations WHERE id = $1 AND user_id = $2")
        .bind(conversation_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_input<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: InputCreateRequest,
) -> Res<ConversationInput> {
    sqlx::query_as::<_, ConversationInput>(
        r#"
        INSERT INTO conversation_inputs (conversation_id, position, kind, content)
        VALUES (
            $1,
            (SELECT COALESCE(MAX(position), -1) + 1 FROM conversation_inputs WHERE conversation_id = $1),
            $2,
            $3
        )
        RETURNING *
        "#,
    )
    .bind(data.conversation_id)
    .bind(data.kind)
    .bind(data.content)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_inputs<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    conversation_id: Uuid,
) -> Res<Vec<ConversationInput>> {
    sqlx::query_as::<_, ConversationInput>(
        "SELECT * FROM conversation_inputs WHERE conversation_id = $1 ORDER BY position",
    )
    .bind(conversation_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_input<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    input_id: Uuid,
    conversation_id: Uuid,
) -> Res<Option<ConversationInput>> {
    sqlx::query_as::<_, ConversationInput>(
        "SELECT * FROM conversation_inputs WHERE id = $1 AND conversation_id = $2",
    )
    .bind(input_id)
    .bind(conversation_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_conversations<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM conversations")
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn count_conversations_by_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM conversations WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn recent_conversations<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    limit: i64,
) -> Res<Vec<Conversation>> {
    sqlx::query_as::<_, Conversation>(
        "SELECT * FROM conversations ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn touch_conversation<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    conversation_id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE conversations SET updated_at = now() WHERE id = $1")
        .bind(conversation_id)
        .execute(executor)
        .await?;
    Ok(())
}
