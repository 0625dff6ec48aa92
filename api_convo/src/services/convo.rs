use analyst::persona::Persona;
use analyst::types::InputKind;
use common::error::{AppError, Res};
use db::{
    dtos::convo::{ConversationCreateRequest, InputCreateRequest},
    models::convo::{Conversation, ConversationInput},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::convo::{ConversationCreateBody, ConversationDetail, InputCreateBody};

const MAX_TITLE_CHARS: usize = 120;

pub async fn create_conversation(
    pool: &PgPool,
    user_id: Uuid,
    body: ConversationCreateBody,
) -> Res<Conversation> {
    let title = body.title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::BadRequest(format!(
            "Title must be between 1 and {} characters",
            MAX_TITLE_CHARS
        )));
    }
    let persona = Persona::parse(&body.persona)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown persona '{}'", body.persona)))?;

    db::convo::insert_conversation(
        pool,
        ConversationCreateRequest {
            user_id,
            title: title.to_string(),
            persona: persona.as_str().to_string(),
        },
    )
    .await
}

/// Fetches an owned conversation or 404s. Other users' conversations are
/// indistinguishable from missing ones.
pub async fn require_owned(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Res<Conversation> {
    db::convo::get_owned_conversation(pool, conversation_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))
}

pub async fn conversation_detail(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Res<ConversationDetail> {
    let conversation = require_owned(pool, conversation_id, user_id).await?;
    let inputs = db::convo::list_inputs(pool, conversation.id).await?;
    let analyses = db::analysis::list_analyses_by_conversation(pool, conversation.id).await?;

    Ok(ConversationDetail {
        conversation,
        inputs,
        analyses,
    })
}

pub async fn append_input(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
    body: InputCreateBody,
) -> Res<ConversationInput> {
    let conversation = require_owned(pool, conversation_id, user_id).await?;

    let kind = InputKind::parse(&body.kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown input kind '{}'", body.kind)))?;
    if body.content.trim().is_empty() {
        return Err(AppError::BadRequest("Input content is empty".to_string()));
    }

    let input = db::convo::insert_input(
        pool,
        InputCreateRequest {
            conversation_id: conversation.id,
            kind: kind.as_str().to_string(),
            content: body.content,
        },
    )
    .await?;
    db::convo::touch_conversation(pool, conversation.id).await?;

    Ok(input)
}

pub async fn remove_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Res<()> {
    let deleted = db::convo::delete_conversation(pool, conversation_id, user_id).await?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::NotFound("Conversation not found".to_string()))
    }
}
